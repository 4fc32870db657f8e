//! Settings screen: theme, notification preferences and logout

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::{NotificationSettings, Result, Theme};
use tracing::{info, warn};

use crate::screen::{clear_if_expired, Banner, BannerKind, ScreenContext, ScreenScope};
use crate::store::{encode_fields, fields, UserPaths};

/// Banner after signing out.
pub const LOGGED_OUT_MESSAGE: &str = "Logged out";

/// Preferences shown on the settings screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub theme: Theme,
    pub notifications: NotificationSettings,
    pub loading: bool,
    pub logged_out: bool,
    pub banner: Option<Banner>,
}

impl SettingsState {
    /// Position of the dark-mode switch.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.theme.is_dark()
    }
}

/// Controller of the settings screen
pub struct SettingsController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<SettingsState>>,
}

impl SettingsController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("settings"),
            state: Arc::new(RwLock::new(SettingsState::default())),
        })
    }

    /// Load the stored theme and notification preferences.
    pub async fn mount(&self) {
        self.state.write().loading = true;
        let outcome = self.ctx.load_profile(&self.paths).await;
        if !self.scope.is_mounted() {
            return;
        }
        let mut state = self.state.write();
        state.loading = false;
        match outcome {
            Ok(profile) => {
                state.theme = profile.theme;
                state.notifications = profile.notifications;
            }
            Err(err) => {
                warn!(error = %err, "failed to load settings");
                state.banner = Some(self.ctx.error_banner(&err));
            }
        }
    }

    /// Ignore results that arrive after the screen is gone.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the preferences.
    pub fn state(&self) -> SettingsState {
        self.state.read().clone()
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Switch theme and persist it as `theme` on the user document. The
    /// switch reverts when the write fails.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn set_dark_mode(&self, dark: bool) -> Result<()> {
        let theme = Theme::from_dark_mode(dark);
        let previous = std::mem::replace(&mut self.state.write().theme, theme);

        let outcome = self
            .ctx
            .store
            .update(&self.paths.profile(), fields([("theme", Value::String(theme.to_string()))]))
            .await;
        if let Err(err) = &outcome {
            warn!(error = %err, "failed to save theme");
            if self.scope.is_mounted() {
                let mut state = self.state.write();
                state.theme = previous;
                state.banner = Some(self.ctx.error_banner(err));
            }
        } else {
            info!(%theme, "theme saved");
        }
        outcome
    }

    /// Persist the notification preferences. The previous values come back
    /// when the write fails.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn update_notifications(&self, settings: NotificationSettings) -> Result<()> {
        let previous = std::mem::replace(&mut self.state.write().notifications, settings.clone());

        let outcome = match encode_fields(&settings) {
            Ok(encoded) => {
                self.ctx
                    .store
                    .update(&self.paths.profile(), fields([("notifications", Value::Object(encoded))]))
                    .await
            }
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            warn!(error = %err, "failed to save notification settings");
            if self.scope.is_mounted() {
                let mut state = self.state.write();
                state.notifications = previous;
                state.banner = Some(self.ctx.error_banner(err));
            }
        }
        outcome
    }

    /// # Errors
    /// Returns the store error.
    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<()> {
        let settings = NotificationSettings {
            enable_notifications: enabled,
            ..self.state.read().notifications.clone()
        };
        self.update_notifications(settings).await
    }

    /// Sign out. The caller returns to the login screen.
    ///
    /// # Errors
    /// Returns the identity provider error.
    pub async fn logout(&self) -> Result<()> {
        let outcome = self.ctx.identity.sign_out().await;
        if self.scope.is_mounted() {
            let mut state = self.state.write();
            match &outcome {
                Ok(()) => {
                    info!(uid = self.paths.uid(), "logged out");
                    state.logged_out = true;
                    state.banner = Some(self.ctx.banner(BannerKind::Info, LOGGED_OUT_MESSAGE));
                }
                Err(err) => {
                    warn!(error = %err, "logout failed");
                    state.banner = Some(self.ctx.error_banner(err));
                }
            }
        }
        outcome
    }
}
