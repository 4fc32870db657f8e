//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment when one exists
//! 2. If any `STUDYBUDDY_*` variable is set, builds the config from the
//!    environment (unset variables keep their defaults)
//! 3. Otherwise searches multiple paths for a config file
//! 4. Falls back to the built-in defaults when no file exists
//!
//! ## Environment Variables
//! - `STUDYBUDDY_USERS_COLLECTION`: Root collection of user documents
//! - `STUDYBUDDY_ERROR_BANNER_MS`: Banner visibility in milliseconds
//! - `STUDYBUDDY_SUCCESS_REDIRECT_MS`: Delay before the post-signup redirect
//! - `STUDYBUDDY_PROGRESS_STEP`: Amount added by one progress tap
//! - `STUDYBUDDY_HOME_SESSION_LIMIT`: Sessions listed on the home screen
//! - `STUDYBUDDY_SIGNUP_WELCOME`: Post the welcome notification (true/false)
//! - `STUDYBUDDY_NOTIFICATION_CHANNEL_ID`: Notification channel id
//! - `STUDYBUDDY_NOTIFICATION_CHANNEL_NAME`: Notification channel name
//! - `STUDYBUDDY_LOG_LEVEL`: Default log filter directive
//! - `STUDYBUDDY_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./studybuddy.json` or `./studybuddy.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use studybuddy_domain::{Config, Result, StudyBuddyError};

use crate::errors::InfraError;

const ENV_PREFIX: &str = "STUDYBUDDY_";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `StudyBuddyError::Config` if a variable or the file found holds
/// an invalid value.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    if has_env_overrides() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match search_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// Starts from the defaults and overrides every field whose variable is set.
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `StudyBuddyError::Config` if no `STUDYBUDDY_*` variable is set or
/// a value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    if !has_env_overrides() {
        return Err(StudyBuddyError::Config(
            "No STUDYBUDDY_* environment variables set".to_string(),
        ));
    }

    let mut config = Config::default();

    if let Some(collection) = env_string("STUDYBUDDY_USERS_COLLECTION") {
        config.store.users_collection = collection;
    }

    let ui = &mut config.ui;
    ui.error_banner_ms = env_parse("STUDYBUDDY_ERROR_BANNER_MS", ui.error_banner_ms)?;
    ui.success_redirect_ms = env_parse("STUDYBUDDY_SUCCESS_REDIRECT_MS", ui.success_redirect_ms)?;
    ui.progress_step = env_parse("STUDYBUDDY_PROGRESS_STEP", ui.progress_step)?;
    ui.home_session_limit = env_parse("STUDYBUDDY_HOME_SESSION_LIMIT", ui.home_session_limit)?;

    let notifications = &mut config.notifications;
    notifications.signup_welcome =
        env_bool("STUDYBUDDY_SIGNUP_WELCOME", notifications.signup_welcome);
    if let Some(channel_id) = env_string("STUDYBUDDY_NOTIFICATION_CHANNEL_ID") {
        notifications.channel_id = channel_id;
    }
    if let Some(channel_name) = env_string("STUDYBUDDY_NOTIFICATION_CHANNEL_NAME") {
        notifications.channel_name = channel_name;
    }

    if let Some(level) = env_string("STUDYBUDDY_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("STUDYBUDDY_LOG_JSON", config.logging.json);

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StudyBuddyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StudyBuddyError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => search_config_paths().ok_or_else(|| {
            StudyBuddyError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(InfraError::from)?;
    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `StudyBuddyError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => Ok(toml::from_str(contents).map_err(InfraError::from)?),
        "json" => Ok(serde_json::from_str(contents).map_err(InfraError::from)?),
        _ => Err(StudyBuddyError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Reject values the screens cannot work with.
fn validate(config: &Config) -> Result<()> {
    if config.store.users_collection.trim().is_empty() {
        return Err(StudyBuddyError::Config("users_collection cannot be empty".to_string()));
    }
    if config.ui.progress_step == 0 {
        return Err(StudyBuddyError::Config("progress_step must be at least 1".to_string()));
    }
    Ok(())
}

/// Search multiple paths for configuration files
///
/// Searches the current working directory, its parent and the executable's
/// directory, in that order.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn search_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("studybuddy.json"),
        dir.join("studybuddy.toml"),
    ]
}

fn has_env_overrides() -> bool {
    std::env::vars().any(|(key, _)| key.starts_with(ENV_PREFIX))
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse a numeric variable, keeping `default` when it is not set.
///
/// # Errors
/// Returns `StudyBuddyError::Config` if the value does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| StudyBuddyError::Config(format!("Invalid value for {key}: {e}"))),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_studybuddy_vars() {
        for (key, _) in std::env::vars().filter(|(key, _)| key.starts_with(ENV_PREFIX)) {
            std::env::remove_var(key);
        }
    }

    fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut temp_file = NamedTempFile::new().expect("temp file should be created");
        temp_file.write_all(contents.as_bytes()).expect("temp file should be written");
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).expect("temp file should be copied");
        (temp_file, path)
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TEST_SB_BOOL_YES", "yes");
        std::env::set_var("TEST_SB_BOOL_UPPER", "TRUE");
        std::env::set_var("TEST_SB_BOOL_OFF", "off");
        assert!(env_bool("TEST_SB_BOOL_YES", false));
        assert!(env_bool("TEST_SB_BOOL_UPPER", false));
        assert!(!env_bool("TEST_SB_BOOL_OFF", true));

        std::env::remove_var("TEST_SB_BOOL_MISSING");
        assert!(env_bool("TEST_SB_BOOL_MISSING", true));

        std::env::remove_var("TEST_SB_BOOL_YES");
        std::env::remove_var("TEST_SB_BOOL_UPPER");
        std::env::remove_var("TEST_SB_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_studybuddy_vars();

        std::env::set_var("STUDYBUDDY_USERS_COLLECTION", "accounts");
        std::env::set_var("STUDYBUDDY_PROGRESS_STEP", "5");
        std::env::set_var("STUDYBUDDY_SIGNUP_WELCOME", "false");
        std::env::set_var("STUDYBUDDY_LOG_JSON", "1");

        let config = load_from_env().expect("env config should load");
        assert_eq!(config.store.users_collection, "accounts");
        assert_eq!(config.ui.progress_step, 5);
        assert!(!config.notifications.signup_welcome);
        assert!(config.logging.json);
        assert_eq!(config.ui.home_session_limit, 3);
        assert_eq!(config.notifications.channel_id, "studybuddy_signup");

        clear_studybuddy_vars();
    }

    #[test]
    fn test_load_from_env_without_variables() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_studybuddy_vars();

        let err = load_from_env().expect_err("no variables set");
        assert!(matches!(err, StudyBuddyError::Config(_)));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_studybuddy_vars();

        std::env::set_var("STUDYBUDDY_ERROR_BANNER_MS", "soon");
        let err = load_from_env().expect_err("non-numeric banner time");
        assert!(matches!(err, StudyBuddyError::Config(msg) if msg.contains("STUDYBUDDY_ERROR_BANNER_MS")));

        std::env::set_var("STUDYBUDDY_ERROR_BANNER_MS", "2000");
        std::env::set_var("STUDYBUDDY_PROGRESS_STEP", "0");
        assert!(load_from_env().is_err(), "zero progress step is rejected");

        clear_studybuddy_vars();
    }

    #[test]
    fn test_load_from_file_toml() {
        let (_file, path) = write_config(
            r#"
[ui]
error_banner_ms = 3000

[logging]
level = "debug"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("toml config should load");
        assert_eq!(config.ui.error_banner_ms, 3000);
        assert_eq!(config.ui.success_redirect_ms, 1500);
        assert_eq!(config.logging.level, "debug");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/config.json")))
            .expect_err("missing file");
        assert!(matches!(err, StudyBuddyError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("ui: {}", &PathBuf::from("config.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
