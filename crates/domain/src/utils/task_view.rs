//! Pure filter/sort views over task lists
//!
//! Both functions take the already-derived display statuses: callers map each
//! task through [`derive_status`](crate::types::derive_status) first, so
//! filtering by "Overdue" sees tasks that only became overdue since they were
//! stored.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;
use crate::types::{Task, TaskStatus};

/// Task filter tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Upcoming,
    InProgress,
    Completed,
    Overdue,
}

impl_domain_enum_conversions!(TaskFilter {
    All => "all",
    Upcoming => "upcoming",
    InProgress => "in_progress",
    Completed => "completed",
    Overdue => "overdue",
});

impl TaskFilter {
    /// The status this filter selects, `None` for "All".
    #[must_use]
    pub fn status(self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Upcoming => Some(TaskStatus::Upcoming),
            Self::InProgress => Some(TaskStatus::InProgress),
            Self::Completed => Some(TaskStatus::Completed),
            Self::Overdue => Some(TaskStatus::Overdue),
        }
    }
}

/// Task sort options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortKey {
    #[default]
    DueDate,
    Priority,
    Subject,
    Progress,
}

impl_domain_enum_conversions!(TaskSortKey {
    DueDate => "due_date",
    Priority => "priority",
    Subject => "subject",
    Progress => "progress",
});

/// Tasks whose status matches `filter`.
///
/// Never mutates its input; `TaskFilter::All` returns every task in input
/// order.
///
/// # Examples
///
/// ```
/// use studybuddy_domain::utils::task_view::{filter_tasks, TaskFilter};
///
/// assert!(filter_tasks(&[], TaskFilter::Overdue).is_empty());
/// ```
#[must_use]
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter) -> Vec<Task> {
    match filter.status() {
        None => tasks.to_vec(),
        Some(status) => tasks.iter().filter(|task| task.status == status).cloned().collect(),
    }
}

fn compare(a: &Task, b: &Task, key: TaskSortKey) -> Ordering {
    match key {
        TaskSortKey::DueDate => a.due_at.cmp(&b.due_at),
        TaskSortKey::Priority => b.priority.rank().cmp(&a.priority.rank()),
        TaskSortKey::Subject => a.subject.cmp(&b.subject),
        TaskSortKey::Progress => b.progress.total_cmp(&a.progress),
    }
}

/// Tasks ordered by `key`.
///
/// Due date and subject sort ascending; priority (by rank) and progress sort
/// descending. The sort is stable, so equal keys keep their input order and
/// sorting twice changes nothing.
#[must_use]
pub fn sort_tasks(tasks: &[Task], key: TaskSortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

/// Per-status counts shown above the task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: usize,
    pub upcoming: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

/// Status counts of `tasks` as last evaluated.
#[must_use]
pub fn summarize_tasks(tasks: &[Task]) -> TaskSummary {
    tasks.iter().fold(TaskSummary { total: tasks.len(), ..TaskSummary::default() }, |mut acc, task| {
        match task.status {
            TaskStatus::Upcoming => acc.upcoming += 1,
            TaskStatus::InProgress => acc.in_progress += 1,
            TaskStatus::Completed => acc.completed += 1,
            TaskStatus::Overdue => acc.overdue += 1,
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::types::{Priority, TaskType};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("valid timestamp")
    }

    fn task(id: &str, due_days: i64, priority: Priority, subject: &str, progress: f32, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            task_type: TaskType::Assignment,
            subject: subject.to_string(),
            due_at: base() + Duration::days(due_days),
            created_at: base(),
            priority,
            status,
            reminder_enabled: true,
            estimated_hours: 1,
            actual_hours: 0,
            progress,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", 3, Priority::Low, "Maths", 0.5, TaskStatus::Upcoming),
            task("b", 1, Priority::Urgent, "Art", 0.1, TaskStatus::InProgress),
            task("c", 2, Priority::High, "Biology", 0.9, TaskStatus::Overdue),
            task("d", 1, Priority::High, "Art", 0.5, TaskStatus::Completed),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn all_filter_returns_input_unchanged() {
        let tasks = sample();
        assert_eq!(filter_tasks(&tasks, TaskFilter::All), tasks);
    }

    #[test]
    fn status_filters_select_matching_tasks() {
        let tasks = sample();
        assert_eq!(ids(&filter_tasks(&tasks, TaskFilter::Overdue)), ["c"]);
        assert_eq!(ids(&filter_tasks(&tasks, TaskFilter::InProgress)), ["b"]);
        assert!(filter_tasks(&tasks[..1], TaskFilter::Completed).is_empty());
    }

    #[test]
    fn sort_keys_order_as_labelled() {
        let tasks = sample();
        assert_eq!(ids(&sort_tasks(&tasks, TaskSortKey::DueDate)), ["b", "d", "c", "a"]);
        assert_eq!(ids(&sort_tasks(&tasks, TaskSortKey::Priority)), ["b", "c", "d", "a"]);
        assert_eq!(ids(&sort_tasks(&tasks, TaskSortKey::Subject)), ["b", "d", "c", "a"]);
        assert_eq!(ids(&sort_tasks(&tasks, TaskSortKey::Progress)), ["c", "a", "d", "b"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let tasks = sample();
        for key in [TaskSortKey::DueDate, TaskSortKey::Priority, TaskSortKey::Subject, TaskSortKey::Progress] {
            let once = sort_tasks(&tasks, key);
            assert_eq!(sort_tasks(&once, key), once);
        }
    }

    #[test]
    fn labels_parse_into_criteria() {
        assert_eq!("In Progress".parse::<TaskFilter>(), Ok(TaskFilter::InProgress));
        assert_eq!("Due Date".parse::<TaskSortKey>(), Ok(TaskSortKey::DueDate));
    }

    #[test]
    fn summary_counts_each_status() {
        let summary = summarize_tasks(&sample());
        assert_eq!(
            summary,
            TaskSummary { total: 4, upcoming: 1, in_progress: 1, completed: 1, overdue: 1 }
        );
    }
}
