//! Port interfaces for local device notifications

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studybuddy_domain::Result;

/// Outcome of a notification permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    Granted,
    Denied,
    /// The platform does not ask (older systems grant implicitly).
    NotRequired,
}

impl PermissionState {
    /// Whether notifications may be posted in this state.
    #[must_use]
    pub fn allows_posting(self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// A notification posted on a named channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNotification {
    pub id: u32,
    pub channel_id: String,
    pub channel_name: String,
    pub title: String,
    pub body: String,
}

/// Trait for posting local notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn request_permission(&self) -> Result<PermissionState>;

    async fn post(&self, notification: LocalNotification) -> Result<()>;
}
