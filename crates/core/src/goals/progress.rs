//! Progress screen: quick goal list with a completion pie chart

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::chart::{completion_pie, PieSlice};
use studybuddy_domain::utils::goal_view::incomplete_first;
use studybuddy_domain::{Goal, Result, StudyBuddyError};
use tracing::{debug, info};

use crate::screen::{clear_if_expired, Banner, BannerSlot, LiveList, ScreenContext, ScreenScope};
use crate::store::{encode_fields, fields, Direction, Query, UserPaths};

/// Goal checklist of the progress screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    /// Incomplete goals first.
    pub goals: LiveList<Goal>,
    pub new_goal_text: String,
    pub banner: Option<Banner>,
}

impl BannerSlot for ProgressState {
    fn banner_slot(&mut self) -> &mut Option<Banner> {
        &mut self.banner
    }
}

impl ProgressState {
    /// Number of completed goals.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.goals.items.iter().filter(|goal| goal.completed).count()
    }

    /// Completed and incomplete slices; empty without goals.
    #[must_use]
    pub fn pie_chart(&self) -> Vec<PieSlice> {
        let completed = self.completed_count();
        completion_pie(completed, self.goals.items.len() - completed)
    }
}

/// Controller of the progress screen
pub struct ProgressController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<ProgressState>>,
}

impl ProgressController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("progress"),
            state: Arc::new(RwLock::new(ProgressState::default())),
        })
    }

    /// Start the live goal query (ordered by completion).
    pub fn mount(&self) {
        let state = Arc::clone(&self.state);
        self.scope.watch::<Goal, _>(
            self.ctx.store.as_ref(),
            &self.paths.goals(),
            Query::new().order_by("completed", Direction::Ascending),
            move |snapshot| state.write().goals.apply(snapshot.map(|goals| incomplete_first(&goals))),
        );
    }

    /// Release the goals listener.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the checklist and quick-add field.
    pub fn state(&self) -> ProgressState {
        self.state.read().clone()
    }

    /// Quick-add text field.
    pub fn set_new_goal_text(&self, value: impl Into<String>) {
        self.state.write().new_goal_text = value.into();
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Add a single-step goal from the text field. Blank text does nothing.
    ///
    /// # Errors
    /// Returns the store error; the text field keeps its content.
    pub async fn add_goal(&self) -> Result<Option<String>> {
        let text = self.state.read().new_goal_text.clone();
        let Ok(goal) = Goal::from_text(&text) else {
            debug!("blank goal text ignored");
            return Ok(None);
        };

        let outcome = self.ctx.store.add(&self.paths.goals(), encode_fields(&goal)?).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Goal added!", |state| state.new_goal_text.clear());
        if let Ok(id) = &outcome {
            info!(goal_id = %id, "goal added");
        }
        outcome.map(Some)
    }

    /// Flip the completion flag of a goal.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown goal, or the store error.
    pub async fn toggle_completed(&self, goal_id: &str) -> Result<()> {
        let mut goal = self.goal(goal_id)?;
        goal.toggle_completed();
        self.set_completed(goal_id, goal.completed).await
    }

    /// Write the completion flag of a goal.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn set_completed(&self, goal_id: &str, completed: bool) -> Result<()> {
        let outcome = self
            .ctx
            .store
            .update(&self.paths.goal(goal_id), fields([("completed", Value::Bool(completed))]))
            .await;
        let message = if completed { "Goal completed!" } else { "Goal marked incomplete." };
        self.ctx.report(&self.scope, &self.state, &outcome, message, |_| {});
        outcome
    }

    /// # Errors
    /// Returns the store error.
    pub async fn remove_goal(&self, goal_id: &str) -> Result<()> {
        let outcome = self.ctx.store.delete(&self.paths.goal(goal_id)).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Goal removed!", |_| {});
        if outcome.is_ok() {
            info!(goal_id, "goal removed");
        }
        outcome
    }

    fn goal(&self, goal_id: &str) -> Result<Goal> {
        self.state
            .read()
            .goals
            .items
            .iter()
            .find(|goal| goal.id == goal_id)
            .cloned()
            .ok_or_else(|| StudyBuddyError::NotFound(format!("Goal {goal_id} not found")))
    }
}
