//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PROGRESS_STEP, ERROR_BANNER_MS, HOME_SESSION_LIMIT, SIGNUP_CHANNEL_ID,
    SIGNUP_CHANNEL_NAME, SUCCESS_REDIRECT_MS, USERS_COLLECTION,
};

/// Application configuration
///
/// Every section falls back to its defaults, so a partial file (or an empty
/// one) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document store layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root collection holding one document per user account.
    pub users_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { users_collection: USERS_COLLECTION.to_string() }
    }
}

/// Screen behaviour tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long error banners stay visible.
    pub error_banner_ms: u64,
    /// Delay between the sign-up success banner and the redirect.
    pub success_redirect_ms: u64,
    /// Amount added to a goal by one "add progress" tap.
    pub progress_step: u32,
    /// Number of upcoming sessions listed on the home screen.
    pub home_session_limit: usize,
}

impl UiConfig {
    /// Display time of error banners.
    pub fn error_banner_ttl(&self) -> Duration {
        Duration::from_millis(self.error_banner_ms)
    }

    /// Pause between a success banner and the redirect.
    pub fn success_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.success_redirect_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_banner_ms: ERROR_BANNER_MS,
            success_redirect_ms: SUCCESS_REDIRECT_MS,
            progress_step: DEFAULT_PROGRESS_STEP,
            home_session_limit: HOME_SESSION_LIMIT,
        }
    }
}

/// Local notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Post the welcome notification after a successful sign-up.
    pub signup_welcome: bool,
    pub channel_id: String,
    pub channel_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            signup_welcome: true,
            channel_id: SIGNUP_CHANNEL_ID.to_string(),
            channel_name: SIGNUP_CHANNEL_NAME.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
