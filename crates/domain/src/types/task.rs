//! Task types and status derivation
//!
//! Stored status and displayed status differ: the display status is always
//! re-derived from the due timestamp with [`derive_status`], while manual
//! advances ([`TaskStatus::next`]) rotate the stored value only.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{DEFAULT_DUE_IN_DAYS, DEFAULT_ESTIMATED_HOURS};
use crate::errors::{FormField, Result, StudyBuddyError};
use crate::impl_domain_enum_conversions;

/// Kind of work a task represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    Assignment,
    Exam,
    Quiz,
    Project,
}

impl_domain_enum_conversions!(TaskType {
    Assignment => "assignment",
    Exam => "exam",
    Quiz => "quiz",
    Project => "project",
});

/// Task urgency, shown as a colored tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl_domain_enum_conversions!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

impl Priority {
    /// Sort rank, low < medium < high < urgent.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

/// Where a task stands relative to its due date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
    Overdue,
}

impl_domain_enum_conversions!(TaskStatus {
    Upcoming => "upcoming",
    InProgress => "in_progress",
    Completed => "completed",
    Overdue => "overdue",
});

impl TaskStatus {
    /// Manual advance: upcoming -> in progress -> completed -> upcoming.
    /// An overdue task is picked up again as in progress.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Upcoming | Self::Overdue => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Upcoming,
        }
    }

    /// Caption shown in the list.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

/// A task stored at `users/{uid}/tasks/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    #[serde(default)]
    pub subject: String,
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default = "reminder_default")]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default)]
    pub actual_hours: u32,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: f32,
}

fn reminder_default() -> bool {
    true
}

fn deserialize_progress<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_progress)
}

/// Clamp a progress value into `[0, 1]`; NaN reads as no progress.
#[must_use]
pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Display status of `task` at `now`.
///
/// Completed is sticky. Anything else past its due timestamp is overdue. A
/// stored overdue status whose due date moved back into the future reverts to
/// upcoming.
#[must_use]
pub fn derive_status(task: &Task, now: DateTime<Utc>) -> TaskStatus {
    match task.status {
        TaskStatus::Completed => TaskStatus::Completed,
        _ if task.due_at < now => TaskStatus::Overdue,
        TaskStatus::Overdue => TaskStatus::Upcoming,
        stored => stored,
    }
}

/// Human due-date label relative to `today`.
#[must_use]
pub fn due_label(task: &Task, today: NaiveDate) -> String {
    let days = (task.due_at.date_naive() - today).num_days();
    match days {
        d if d < 0 => format!("Overdue by {} days", -d),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d => format!("Due in {d} days"),
    }
}

/// Due timestamp for a task due on `date`: the last minute of that day.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last_minute = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default();
    date.and_time(last_minute).and_utc()
}

/// Default due date offered by the add-task form.
#[must_use]
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_DUE_IN_DAYS)
}

/// Field values of the add-task form
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub task_type: TaskType,
    pub priority: Priority,
    pub due_date: NaiveDate,
    /// Raw text of the estimated hours field; blank means the default.
    pub estimated_hours: String,
    pub reminder_enabled: bool,
}

impl NewTask {
    /// Form defaults for a task opened on `today`.
    #[must_use]
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            subject: String::new(),
            task_type: TaskType::Assignment,
            priority: Priority::Medium,
            due_date: default_due_date(today),
            estimated_hours: DEFAULT_ESTIMATED_HOURS.to_string(),
            reminder_enabled: true,
        }
    }

    /// Validate the form and build the task to store.
    ///
    /// # Errors
    /// Returns a validation error for a blank title or subject, or a
    /// non-numeric estimate.
    pub fn into_task(self, now: DateTime<Utc>) -> Result<Task> {
        let title = self.title.trim();
        let subject = self.subject.trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push(FormField::Title);
        }
        if subject.is_empty() {
            missing.push(FormField::Subject);
        }
        if !missing.is_empty() {
            return Err(StudyBuddyError::validation("Please fill in all fields.", missing));
        }

        let hours = self.estimated_hours.trim();
        let estimated_hours = if hours.is_empty() {
            DEFAULT_ESTIMATED_HOURS
        } else {
            hours.parse::<u32>().map_err(|_| {
                StudyBuddyError::validation(
                    "Estimated hours must be a whole number.",
                    [FormField::EstimatedHours],
                )
            })?
        };

        Ok(Task {
            id: String::new(),
            title: title.to_string(),
            description: self.description.trim().to_string(),
            task_type: self.task_type,
            subject: subject.to_string(),
            due_at: end_of_day(self.due_date),
            created_at: now,
            priority: self.priority,
            status: TaskStatus::Upcoming,
            reminder_enabled: self.reminder_enabled,
            estimated_hours,
            actual_hours: 0,
            progress: 0.0,
        })
    }
}
