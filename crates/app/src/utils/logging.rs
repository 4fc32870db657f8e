//! Tracing subscriber setup and stable error labels

use anyhow::Context;
use studybuddy_domain::{LoggingConfig, StudyBuddyError};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. JSON output is meant for log
/// shipping; the default is the human-readable formatter.
///
/// # Errors
/// Returns an error when the level directive is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level directive: {}", config.level))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed = if config.json { builder.json().try_init() } else { builder.try_init() };
    installed.map_err(anyhow::Error::msg).context("failed to install tracing subscriber")
}

/// Convert a `StudyBuddyError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub fn error_label(error: &StudyBuddyError) -> &'static str {
    match error {
        StudyBuddyError::Validation { .. } => "validation",
        StudyBuddyError::NotFound(_) => "not_found",
        StudyBuddyError::Auth(_) => "auth",
        StudyBuddyError::Store(_) => "store",
        StudyBuddyError::NotAuthenticated => "not_authenticated",
        StudyBuddyError::Config(_) => "config",
        StudyBuddyError::Internal(_) => "internal",
    }
}
