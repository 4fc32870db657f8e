//! Sign-up screen controller

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::validation::validate_sign_up;
use studybuddy_domain::{FormField, Result, StudyBuddyError};
use tracing::{debug, info, warn};

use crate::screen::{clear_if_expired, Banner, BannerKind, ScreenContext, ScreenScope};
use crate::store::{fields, Query, UserPaths};

/// Banner shown before redirecting after sign-up.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! Redirecting...";

/// Form values and feedback of the sign-up screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpState {
    pub email: String,
    pub username: String,
    pub password: String,
    pub retype_password: String,
    pub invalid_fields: Vec<FormField>,
    pub loading: bool,
    pub banner: Option<Banner>,
    /// Set once the account and its profile document exist.
    pub completed: bool,
}

impl SignUpState {
    /// Whether `field` is flagged by the last validation.
    #[must_use]
    pub fn has_error(&self, field: FormField) -> bool {
        self.invalid_fields.contains(&field)
    }
}

/// Controller of the sign-up screen
pub struct SignUpController {
    ctx: ScreenContext,
    scope: ScreenScope,
    state: Arc<RwLock<SignUpState>>,
}

/// Replace an empty remote message with a screen-specific fallback.
fn with_fallback(error: StudyBuddyError, fallback: &str) -> StudyBuddyError {
    match error {
        StudyBuddyError::Auth(message) if message.trim().is_empty() => {
            StudyBuddyError::Auth(fallback.to_string())
        }
        StudyBuddyError::Store(message) if message.trim().is_empty() => {
            StudyBuddyError::Store(fallback.to_string())
        }
        other => other,
    }
}

impl SignUpController {
    /// Sign-up screen over `ctx`.
    pub fn new(ctx: ScreenContext) -> Self {
        Self { ctx, scope: ScreenScope::new("signup"), state: Arc::new(RwLock::new(SignUpState::default())) }
    }

    /// Snapshot of the form and its feedback.
    pub fn state(&self) -> SignUpState {
        self.state.read().clone()
    }

    /// Email field.
    pub fn set_email(&self, value: impl Into<String>) {
        self.state.write().email = value.into();
    }

    /// Username field.
    pub fn set_username(&self, value: impl Into<String>) {
        self.state.write().username = value.into();
    }

    /// Password field.
    pub fn set_password(&self, value: impl Into<String>) {
        self.state.write().password = value.into();
    }

    /// Password confirmation field.
    pub fn set_retype_password(&self, value: impl Into<String>) {
        self.state.write().retype_password = value.into();
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Ignore results that arrive after the screen is gone.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Validate, check the username is free, create the account and write
    /// its profile document. Returns the new user id.
    ///
    /// On success the banner shows the redirect message for the configured
    /// redirect delay; the caller navigates once it has elapsed.
    ///
    /// # Errors
    /// Returns the first error of the chain; it is also shown in the banner.
    pub async fn submit(&self) -> Result<String> {
        let (email, username, password, retype) = {
            let state = self.state.read();
            (
                state.email.trim().to_string(),
                state.username.trim().to_string(),
                state.password.clone(),
                state.retype_password.clone(),
            )
        };

        if let Err(err) = validate_sign_up(&email, &username, &password, &retype) {
            self.fail(&err, err.fields().to_vec());
            return Err(err);
        }

        {
            let mut state = self.state.write();
            state.loading = true;
            state.invalid_fields.clear();
            state.banner = None;
        }

        let outcome = self.create_account(&email, &username, &password).await;
        if !self.scope.is_mounted() {
            debug!("sign-up finished after the screen was disposed");
            return outcome;
        }

        match &outcome {
            Ok(uid) => {
                info!(uid = %uid, "account created");
                let banner = Banner::new(
                    BannerKind::Success,
                    SIGNUP_SUCCESS_MESSAGE,
                    self.ctx.clock.instant(),
                    self.ctx.config.ui.success_redirect_delay(),
                );
                let mut state = self.state.write();
                state.loading = false;
                state.completed = true;
                state.banner = Some(banner);
            }
            Err(err) => {
                warn!(error = %err, "sign-up failed");
                let flagged = if err.is_validation() { err.fields().to_vec() } else { Vec::new() };
                self.fail(err, flagged);
            }
        }
        outcome
    }

    async fn create_account(&self, email: &str, username: &str, password: &str) -> Result<String> {
        let query = Query::new().where_eq("username", Value::String(username.to_string())).limit(1);
        let existing = self
            .ctx
            .store
            .query(self.ctx.users_collection(), &query)
            .await
            .map_err(|err| with_fallback(err, "Failed to check username."))?;
        if !existing.is_empty() {
            return Err(StudyBuddyError::validation("Username already exists.", [FormField::Username]));
        }

        let uid = self
            .ctx
            .identity
            .sign_up(email, password)
            .await
            .map_err(|err| with_fallback(err, "Sign up failed."))?;

        let profile = UserPaths::new(self.ctx.users_collection(), uid.clone()).profile();
        let document = fields([
            ("username", Value::String(username.to_string())),
            ("email", Value::String(email.to_string())),
        ]);
        self.ctx
            .store
            .set(&profile, document)
            .await
            .map_err(|err| with_fallback(err, "Failed to save user."))?;

        Ok(uid)
    }

    fn fail(&self, error: &StudyBuddyError, fields: Vec<FormField>) {
        let banner = self.ctx.error_banner(error);
        let mut state = self.state.write();
        state.loading = false;
        state.invalid_fields = fields;
        state.banner = Some(banner);
    }
}
