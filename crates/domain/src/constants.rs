//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Document store layout
/// Collection of user profile documents.
pub const USERS_COLLECTION: &str = "users";
/// Per-user goals subcollection.
pub const GOALS_COLLECTION: &str = "goals";
/// Per-user tasks subcollection.
pub const TASKS_COLLECTION: &str = "tasks";
/// Per-user study sessions subcollection.
pub const SESSIONS_COLLECTION: &str = "sessions";
/// Per-user notes subcollection.
pub const NOTES_COLLECTION: &str = "notes";

// Banner timing
/// How long error banners stay visible.
pub const ERROR_BANNER_MS: u64 = 5000;
/// Delay before leaving a screen after a success banner.
pub const SUCCESS_REDIRECT_MS: u64 = 1500;

// Progress model
/// Progress added by one "+1" tap.
pub const DEFAULT_PROGRESS_STEP: u32 = 1;
/// Upcoming sessions listed on the home screen.
pub const HOME_SESSION_LIMIT: usize = 3;

// Account rules
/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Sign-up notification
/// Notification channel of the welcome message.
pub const SIGNUP_CHANNEL_ID: &str = "studybuddy_signup";
/// User-visible channel name.
pub const SIGNUP_CHANNEL_NAME: &str = "StudyBuddy Signup";
/// Id of the welcome notification.
pub const SIGNUP_NOTIFICATION_ID: u32 = 1001;
/// Welcome title.
pub const SIGNUP_NOTIFICATION_TITLE: &str = "Welcome to StudyBuddy!";
/// Welcome body.
pub const SIGNUP_NOTIFICATION_BODY: &str = "Thank you for signing up to StudyBuddy.";

// Task defaults
/// Due date offset of a new task.
pub const DEFAULT_DUE_IN_DAYS: i64 = 7;
/// Estimate of a new task.
pub const DEFAULT_ESTIMATED_HOURS: u32 = 2;

// Session limits
/// Longest study session accepted, one day.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;
