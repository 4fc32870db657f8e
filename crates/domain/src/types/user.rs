//! User profile document and per-user settings

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::onboarding::StudyPreferences;
use crate::impl_domain_enum_conversions;

/// Appearance stored on the user document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl_domain_enum_conversions!(Theme {
    Light => "light",
    Dark => "dark",
});

impl Theme {
    /// Theme for the dark-mode switch position.
    #[must_use]
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Whether the dark-mode switch is on.
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Reminder preferences shown on the notification settings screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub enable_notifications: bool,
    pub study_session_reminders: bool,
    pub deadline_reminders: bool,
    /// Minutes before a session or deadline.
    pub reminder_frequency: u32,
    pub notification_tone: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_notifications: true,
            study_session_reminders: true,
            deadline_reminders: true,
            reminder_frequency: 15,
            notification_tone: "Default".to_string(),
        }
    }
}

/// The `users/{uid}` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing)]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Answers from the first-run setup; absent until it is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<StudyPreferences>,
}

impl UserProfile {
    /// Name used in the home screen greeting.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or("Student")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_falls_back_to_student() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.display_name(), "Student");
        profile.username = Some("  ".to_string());
        assert_eq!(profile.display_name(), "Student");
        profile.username = Some("ada".to_string());
        assert_eq!(profile.display_name(), "ada");
    }

    #[test]
    fn bare_profile_document_uses_defaults() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "username": "ada",
            "email": "ada@example.com",
            "theme": "dark"
        }))
        .expect("profile should parse");
        assert!(profile.theme.is_dark());
        assert_eq!(profile.notifications, NotificationSettings::default());
        assert_eq!(profile.notifications.reminder_frequency, 15);
    }

    #[test]
    fn theme_round_trips_through_dark_mode_flag() {
        assert_eq!(Theme::from_dark_mode(true).to_string(), "dark");
        assert_eq!(Theme::from_dark_mode(false).to_string(), "light");
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
    }
}
