//! Login screen controller

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::validation::{is_email_identifier, validate_login};
use studybuddy_domain::{FormField, Result, StudyBuddyError};
use tracing::{debug, info, warn};

use crate::screen::{clear_if_expired, Banner, ScreenContext, ScreenScope};
use crate::store::Query;

/// Form values and feedback of the login screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub identifier: String,
    pub password: String,
    pub invalid_fields: Vec<FormField>,
    pub loading: bool,
    pub banner: Option<Banner>,
}

impl LoginState {
    /// Whether `field` is flagged by the last validation.
    #[must_use]
    pub fn has_error(&self, field: FormField) -> bool {
        self.invalid_fields.contains(&field)
    }
}

/// Controller of the login screen
pub struct LoginController {
    ctx: ScreenContext,
    scope: ScreenScope,
    state: Arc<RwLock<LoginState>>,
}

impl LoginController {
    /// Login screen over `ctx`; needs no signed-in user.
    pub fn new(ctx: ScreenContext) -> Self {
        Self { ctx, scope: ScreenScope::new("login"), state: Arc::new(RwLock::new(LoginState::default())) }
    }

    /// Snapshot of the form and its feedback.
    pub fn state(&self) -> LoginState {
        self.state.read().clone()
    }

    /// Email or username field.
    pub fn set_identifier(&self, value: impl Into<String>) {
        self.state.write().identifier = value.into();
    }

    /// Password field.
    pub fn set_password(&self, value: impl Into<String>) {
        self.state.write().password = value.into();
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Ignore results that arrive after the screen is gone.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Validate the form and sign in. Returns the user id on success.
    ///
    /// Identifiers without `@` are resolved to an email through the users
    /// collection first.
    ///
    /// # Errors
    /// Returns the validation, lookup or provider error that stopped the
    /// login; the same error is shown in the banner.
    pub async fn submit(&self) -> Result<String> {
        let (identifier, password) = {
            let state = self.state.read();
            (state.identifier.trim().to_string(), state.password.clone())
        };

        if let Err(err) = validate_login(&identifier, &password) {
            self.fail(&err, err.fields().to_vec());
            return Err(err);
        }

        {
            let mut state = self.state.write();
            state.loading = true;
            state.invalid_fields.clear();
            state.banner = None;
        }

        let outcome = self.sign_in(&identifier, &password).await;
        if !self.scope.is_mounted() {
            debug!("login finished after the screen was disposed");
            return outcome;
        }

        match &outcome {
            Ok(uid) => {
                info!(uid = %uid, "login succeeded");
                self.state.write().loading = false;
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                let flagged = match err {
                    StudyBuddyError::NotFound(_) => vec![FormField::UsernameOrEmail],
                    StudyBuddyError::Auth(_) => vec![FormField::UsernameOrEmail, FormField::Password],
                    _ => Vec::new(),
                };
                self.fail(err, flagged);
            }
        }
        outcome
    }

    async fn sign_in(&self, identifier: &str, password: &str) -> Result<String> {
        let email = if is_email_identifier(identifier) {
            identifier.to_string()
        } else {
            self.resolve_username(identifier).await?
        };

        self.ctx.identity.sign_in(&email, password).await.map_err(|err| match err {
            StudyBuddyError::Auth(message) if message.trim().is_empty() => {
                StudyBuddyError::Auth("Invalid credentials.".to_string())
            }
            other => other,
        })
    }

    async fn resolve_username(&self, username: &str) -> Result<String> {
        let query = Query::new().where_eq("username", Value::String(username.to_string())).limit(1);
        let matches = self.ctx.store.query(self.ctx.users_collection(), &query).await.map_err(|err| {
            match err {
                StudyBuddyError::Store(message) if message.trim().is_empty() => {
                    StudyBuddyError::Store("Login failed.".to_string())
                }
                other => other,
            }
        })?;

        matches
            .first()
            .and_then(|doc| doc.get_str("email"))
            .map(str::to_string)
            .ok_or_else(|| StudyBuddyError::NotFound("Username not found.".to_string()))
    }

    fn fail(&self, error: &StudyBuddyError, fields: Vec<FormField>) {
        let banner = self.ctx.error_banner(error);
        let mut state = self.state.write();
        state.loading = false;
        state.invalid_fields = fields;
        state.banner = Some(banner);
    }
}
