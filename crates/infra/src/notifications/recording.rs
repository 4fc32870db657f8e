//! Notifier that keeps posted notifications in memory
//!
//! Used headless and in tests: the permission answer is configurable and
//! every posted notification is kept for inspection.

use async_trait::async_trait;
use parking_lot::Mutex;
use studybuddy_core::notifications::{LocalNotification, Notifier, PermissionState};
use studybuddy_domain::{Result, StudyBuddyError};
use tracing::info;

/// Notifier that keeps posted notifications in memory
#[derive(Debug)]
pub struct RecordingNotifier {
    permission: Mutex<PermissionState>,
    posted: Mutex<Vec<LocalNotification>>,
    failure: Mutex<Option<String>>,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new(PermissionState::Granted)
    }
}

impl RecordingNotifier {
    /// Notifier with `permission` already decided.
    #[must_use]
    pub fn new(permission: PermissionState) -> Self {
        Self {
            permission: Mutex::new(permission),
            posted: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Change the permission state.
    pub fn set_permission(&self, permission: PermissionState) {
        *self.permission.lock() = permission;
    }

    /// Make every following post fail with `message` (`None` to recover).
    pub fn fail_posts(&self, message: Option<String>) {
        *self.failure.lock() = message;
    }

    /// Notifications posted so far.
    pub fn posted(&self) -> Vec<LocalNotification> {
        self.posted.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn request_permission(&self) -> Result<PermissionState> {
        Ok(*self.permission.lock())
    }

    async fn post(&self, notification: LocalNotification) -> Result<()> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(StudyBuddyError::Internal(message));
        }
        info!(
            notification_id = notification.id,
            channel = %notification.channel_id,
            title = %notification.title,
            "local notification posted"
        );
        self.posted.lock().push(notification);
        Ok(())
    }
}
