//! Welcome notification posted once a new account is created

use studybuddy_domain::constants::{
    SIGNUP_NOTIFICATION_BODY, SIGNUP_NOTIFICATION_ID, SIGNUP_NOTIFICATION_TITLE,
};
use studybuddy_domain::{NotificationConfig, Result};
use tracing::{debug, info};

use super::ports::{LocalNotification, Notifier};

/// The welcome notification posted after sign-up.
#[must_use]
pub fn signup_welcome(config: &NotificationConfig) -> LocalNotification {
    LocalNotification {
        id: SIGNUP_NOTIFICATION_ID,
        channel_id: config.channel_id.clone(),
        channel_name: config.channel_name.clone(),
        title: SIGNUP_NOTIFICATION_TITLE.to_string(),
        body: SIGNUP_NOTIFICATION_BODY.to_string(),
    }
}

/// Ask for permission, then post the welcome notification.
///
/// Returns whether a notification was posted. A denied permission is not an
/// error.
///
/// # Errors
/// Propagates notifier failures.
pub async fn send_signup_welcome(notifier: &dyn Notifier, config: &NotificationConfig) -> Result<bool> {
    if !config.signup_welcome {
        debug!("signup welcome notification disabled");
        return Ok(false);
    }

    let permission = notifier.request_permission().await?;
    if !permission.allows_posting() {
        info!(?permission, "notification permission not granted; skipping welcome");
        return Ok(false);
    }

    notifier.post(signup_welcome(config)).await?;
    info!(notification_id = SIGNUP_NOTIFICATION_ID, "signup welcome notification posted");
    Ok(true)
}
