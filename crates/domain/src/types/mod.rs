//! Domain types: the document model of every StudyBuddy collection

pub mod goal;
pub mod note;
pub mod onboarding;
pub mod session;
pub mod task;
pub mod user;

pub use goal::{parse_target_value, Goal, GoalKind};
pub use note::{filter_notes, note_filters, NewNote, StudyNote, ALL_NOTES};
pub use onboarding::{OnboardingPage, StudyPreferences};
pub use session::{
    compute_duration, format_time_of_day, parse_form_date, parse_time_of_day, sort_sessions,
    upcoming_sessions, NewSession, Session,
};
pub use task::{
    clamp_progress, default_due_date, derive_status, due_label, end_of_day, NewTask, Priority,
    Task, TaskStatus, TaskType,
};
pub use user::{NotificationSettings, Theme, UserProfile};
