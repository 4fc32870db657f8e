//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use serde_json::error::Category;
use serde_json::Error as JsonError;
use studybuddy_domain::StudyBuddyError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub StudyBuddyError);

impl From<InfraError> for StudyBuddyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<StudyBuddyError> for InfraError {
    fn from(value: StudyBuddyError) -> Self {
        Self(value)
    }
}

trait IntoStudyBuddyError {
    fn into_studybuddy(self) -> StudyBuddyError;
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → StudyBuddyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyBuddyError for JsonError {
    fn into_studybuddy(self) -> StudyBuddyError {
        match self.classify() {
            Category::Io => StudyBuddyError::Internal(format!("JSON I/O failure: {self}")),
            Category::Syntax | Category::Eof => {
                StudyBuddyError::Config(format!("Invalid JSON format: {self}"))
            }
            Category::Data => StudyBuddyError::Config(format!("Invalid JSON value: {self}")),
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_studybuddy())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → StudyBuddyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyBuddyError for TomlError {
    fn into_studybuddy(self) -> StudyBuddyError {
        StudyBuddyError::Config(format!("Invalid TOML format: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(value.into_studybuddy())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → StudyBuddyError */
/* -------------------------------------------------------------------------- */

impl IntoStudyBuddyError for IoError {
    fn into_studybuddy(self) -> StudyBuddyError {
        match self.kind() {
            ErrorKind::NotFound => StudyBuddyError::Config(format!("Config file not found: {self}")),
            ErrorKind::PermissionDenied => {
                StudyBuddyError::Config(format!("Config file not readable: {self}"))
            }
            _ => StudyBuddyError::Internal(format!("I/O failure: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_studybuddy())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
