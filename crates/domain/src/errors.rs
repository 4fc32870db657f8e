//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form input a validation error is attached to.
///
/// Screens use these to flag individual fields inline while the error message
/// itself goes to the transient banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Email,
    Username,
    UsernameOrEmail,
    Password,
    RetypePassword,
    Title,
    Text,
    Subject,
    Date,
    StartTime,
    EndTime,
    Duration,
    TargetValue,
    Unit,
    EstimatedHours,
    Progress,
    Content,
    AcademicLevel,
    GoalPreferences,
}

/// Main error type for StudyBuddy
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StudyBuddyError {
    /// Input rejected before any remote call was made.
    #[error("{message}")]
    Validation { message: String, fields: Vec<FormField> },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Identity provider failure; the message is the provider's own text.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Document store failure; the message is the store's own text.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StudyBuddyError {
    /// Build a validation error flagging the given fields.
    pub fn validation(message: impl Into<String>, fields: impl Into<Vec<FormField>>) -> Self {
        Self::Validation { message: message.into(), fields: fields.into() }
    }

    /// Whether the error belongs to the validation class.
    ///
    /// "Not found" lookups (e.g. an unknown username) are reported like
    /// validation failures rather than remote failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::NotFound(_))
    }

    /// Whether the error came back from a remote collaborator.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Store(_))
    }

    /// Fields flagged by a validation error (empty for every other kind).
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Text shown to the user in the screen banner.
    ///
    /// Remote failures are surfaced verbatim, without the category prefix
    /// used by `Display`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotFound(message) | Self::Auth(message) | Self::Store(message) => {
                message.clone()
            }
            Self::NotAuthenticated => "Please sign in to continue.".to_string(),
            Self::Config(_) | Self::Internal(_) => self.to_string(),
        }
    }
}

/// Result type alias for StudyBuddy operations
pub type Result<T> = std::result::Result<T, StudyBuddyError>;
