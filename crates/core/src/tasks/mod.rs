//! Task & assignment tracker screen
//!
//! Stored tasks come from the live query as written. Everything the screen
//! shows goes through [`derive_status`] at the clock's current time first,
//! then through the filter and sort views.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::task_view::{
    filter_tasks, sort_tasks, summarize_tasks, TaskFilter, TaskSortKey, TaskSummary,
};
use studybuddy_domain::{
    clamp_progress, derive_status, due_label, FormField, NewTask, Result, StudyBuddyError, Task,
};
use tracing::info;

use crate::screen::{clear_if_expired, Banner, BannerSlot, LiveList, ScreenContext, ScreenScope};
use crate::store::{encode_fields, fields, Query, UserPaths};

/// Tasks, filter and sort of the task tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskTrackerState {
    /// Tasks with their stored status.
    pub tasks: LiveList<Task>,
    pub filter: TaskFilter,
    pub sort: TaskSortKey,
    pub invalid_fields: Vec<FormField>,
    pub banner: Option<Banner>,
}

impl BannerSlot for TaskTrackerState {
    fn banner_slot(&mut self) -> &mut Option<Banner> {
        &mut self.banner
    }
}

impl TaskTrackerState {
    /// Stored tasks with display statuses derived at `now`.
    #[must_use]
    pub fn derived_tasks(&self, now: DateTime<Utc>) -> Vec<Task> {
        self.tasks
            .items
            .iter()
            .map(|task| Task { status: derive_status(task, now), ..task.clone() })
            .collect()
    }

    /// The list as displayed: derived, filtered, sorted.
    #[must_use]
    pub fn visible_tasks(&self, now: DateTime<Utc>) -> Vec<Task> {
        sort_tasks(&filter_tasks(&self.derived_tasks(now), self.filter), self.sort)
    }

    /// Status counts at `now`.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> TaskSummary {
        summarize_tasks(&self.derived_tasks(now))
    }
}

/// Controller of the task tracker screen
pub struct TaskTrackerController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<TaskTrackerState>>,
}

impl TaskTrackerController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("tasks"),
            state: Arc::new(RwLock::new(TaskTrackerState::default())),
        })
    }

    /// Start the live query on the user's tasks.
    pub fn mount(&self) {
        let state = Arc::clone(&self.state);
        self.scope.watch::<Task, _>(
            self.ctx.store.as_ref(),
            &self.paths.tasks(),
            Query::new(),
            move |snapshot| state.write().tasks.apply(snapshot),
        );
    }

    /// Release the tasks listener.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the screen state.
    pub fn state(&self) -> TaskTrackerState {
        self.state.read().clone()
    }

    /// Displayed tasks at the current time.
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.state.read().visible_tasks(self.ctx.clock.now())
    }

    /// Status counts as of the clock.
    pub fn summary(&self) -> TaskSummary {
        self.state.read().summary(self.ctx.clock.now())
    }

    /// Due text of `task` as of the clock.
    pub fn due_label(&self, task: &Task) -> String {
        due_label(task, self.ctx.clock.now().date_naive())
    }

    /// Empty add-task form with today's defaults.
    pub fn blank_form(&self) -> NewTask {
        NewTask::blank(self.ctx.clock.now().date_naive())
    }

    /// Select a status filter.
    pub fn set_filter(&self, filter: TaskFilter) {
        self.state.write().filter = filter;
    }

    /// Select the sort key.
    pub fn set_sort(&self, sort: TaskSortKey) {
        self.state.write().sort = sort;
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// # Errors
    /// Returns the validation error (fields flagged) or the store error.
    pub async fn add_task(&self, form: NewTask) -> Result<String> {
        let task = match form.into_task(self.ctx.clock.now()) {
            Ok(task) => task,
            Err(err) => {
                let mut state = self.state.write();
                state.invalid_fields = err.fields().to_vec();
                state.banner = Some(self.ctx.error_banner(&err));
                return Err(err);
            }
        };

        let outcome = self.ctx.store.add(&self.paths.tasks(), encode_fields(&task)?).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Task added!", |state| state.invalid_fields.clear());
        if let Ok(id) = &outcome {
            info!(task_id = %id, priority = %task.priority, "task added");
        }
        outcome
    }

    /// Rotate the stored status one step.
    ///
    /// The rotation works on the stored value; a past-due task keeps showing
    /// as overdue until it reaches completed.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown task, or the store error.
    pub async fn advance_status(&self, task_id: &str) -> Result<()> {
        let task = self.task(task_id)?;
        let next = task.status.next();
        let outcome = self
            .ctx
            .store
            .update(&self.paths.task(task_id), fields([("status", Value::String(next.to_string()))]))
            .await;
        self.ctx.report(&self.scope, &self.state, &outcome, &format!("Marked as {}", next.label()), |_| {});
        if outcome.is_ok() {
            info!(task_id, from = %task.status, to = %next, "task status advanced");
        }
        outcome
    }

    /// Store a new progress value, clamped to `[0, 1]`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown task, or the store error.
    pub async fn set_progress(&self, task_id: &str, progress: f32) -> Result<()> {
        self.task(task_id)?;
        let progress = clamp_progress(progress);
        let outcome = self
            .ctx
            .store
            .update(&self.paths.task(task_id), fields([("progress", Value::from(progress))]))
            .await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Progress updated!", |_| {});
        outcome
    }

    /// # Errors
    /// Returns the store error.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        let outcome = self.ctx.store.delete(&self.paths.task(task_id)).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Task deleted!", |_| {});
        outcome
    }

    fn task(&self, task_id: &str) -> Result<Task> {
        self.state
            .read()
            .tasks
            .items
            .iter()
            .find(|task| task.id == task_id)
            .cloned()
            .ok_or_else(|| StudyBuddyError::NotFound(format!("Task {task_id} not found")))
    }
}
