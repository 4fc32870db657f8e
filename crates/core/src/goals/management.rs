//! Goal management screen: targets, progress steps, tabs and statistics

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::goal_view::{filter_goals, goal_stats, GoalFilter, GoalStats};
use studybuddy_domain::{
    parse_target_value, FormField, Goal, GoalKind, Result, StudyBuddyError,
};
use tracing::{debug, info};

use crate::screen::{clear_if_expired, Banner, BannerSlot, LiveList, ScreenContext, ScreenScope};
use crate::store::{encode_fields, fields, Query, UserPaths};

/// Add-goal dialog fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalForm {
    pub title: String,
    pub description: String,
    pub target: String,
    pub unit: String,
    pub kind: GoalKind,
    pub target_date: Option<NaiveDate>,
}

impl GoalForm {
    fn into_goal(self) -> Result<Goal> {
        let missing: Vec<FormField> = [
            (&self.title, FormField::Title),
            (&self.target, FormField::TargetValue),
            (&self.unit, FormField::Unit),
        ]
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, field)| *field)
        .collect();
        if !missing.is_empty() {
            return Err(StudyBuddyError::validation("Please fill in all fields.", missing));
        }

        let mut goal = Goal::with_target(&self.title, parse_target_value(&self.target)?, &self.unit)?;
        goal.description = self.description.trim().to_string();
        goal.kind = self.kind;
        goal.target_date = self.target_date;
        Ok(goal)
    }
}

/// Goals, filter tab, form and selection of the goal management screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalsState {
    pub goals: LiveList<Goal>,
    pub filter: GoalFilter,
    pub form: GoalForm,
    pub invalid_fields: Vec<FormField>,
    /// Goal opened in the details dialog.
    pub selected: Option<String>,
    pub banner: Option<Banner>,
}

impl BannerSlot for GoalsState {
    fn banner_slot(&mut self) -> &mut Option<Banner> {
        &mut self.banner
    }
}

impl GoalsState {
    /// Goals matching the selected filter tab.
    #[must_use]
    pub fn visible_goals(&self) -> Vec<Goal> {
        filter_goals(&self.goals.items, self.filter)
    }

    /// Counts shown above the goal list.
    #[must_use]
    pub fn stats(&self) -> GoalStats {
        goal_stats(&self.goals.items)
    }

    /// Goal opened in the detail view, if it still exists.
    #[must_use]
    pub fn selected_goal(&self) -> Option<&Goal> {
        let id = self.selected.as_deref()?;
        self.goals.items.iter().find(|goal| goal.id == id)
    }
}

/// Controller of the goal management screen
pub struct GoalsController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<GoalsState>>,
}

impl GoalsController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("goals"),
            state: Arc::new(RwLock::new(GoalsState::default())),
        })
    }

    /// Start the live query on the user's goals.
    pub fn mount(&self) {
        let state = Arc::clone(&self.state);
        self.scope.watch::<Goal, _>(
            self.ctx.store.as_ref(),
            &self.paths.goals(),
            Query::new(),
            move |snapshot| state.write().goals.apply(snapshot),
        );
    }

    /// Release the goals listener.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the screen state.
    pub fn state(&self) -> GoalsState {
        self.state.read().clone()
    }

    /// Select a filter tab.
    pub fn set_filter(&self, filter: GoalFilter) {
        self.state.write().filter = filter;
    }

    /// Change the add-goal form in place.
    pub fn edit_form(&self, edit: impl FnOnce(&mut GoalForm)) {
        edit(&mut self.state.write().form);
    }

    /// Open a goal in the detail view, or close it with `None`.
    pub fn select(&self, goal_id: Option<&str>) {
        self.state.write().selected = goal_id.map(str::to_string);
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Validate the dialog and create the goal.
    ///
    /// # Errors
    /// Returns the validation error (fields flagged) or the store error.
    pub async fn add_goal(&self) -> Result<String> {
        let form = self.state.read().form.clone();
        let goal = match form.into_goal() {
            Ok(goal) => goal,
            Err(err) => {
                let mut state = self.state.write();
                state.invalid_fields = err.fields().to_vec();
                state.banner = Some(self.ctx.error_banner(&err));
                return Err(err);
            }
        };

        let outcome = self.ctx.store.add(&self.paths.goals(), encode_fields(&goal)?).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Goal added!", |state| {
            state.form = GoalForm::default();
            state.invalid_fields.clear();
        });
        if let Ok(id) = &outcome {
            info!(goal_id = %id, kind = %goal.kind, target = goal.target_value, "goal added");
        }
        outcome
    }

    /// Add one configured step of progress. Completed goals are left alone.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown goal, or the store error.
    pub async fn add_progress(&self, goal_id: &str) -> Result<()> {
        let mut goal = self.goal(goal_id)?;
        if goal.completed {
            debug!(goal_id, "progress on a completed goal ignored");
            return Ok(());
        }

        goal.increment(self.ctx.config.ui.progress_step);
        let message = if goal.completed { "Goal completed!" } else { "Progress updated!" };
        self.write_progress(&goal, message).await
    }

    /// Mark a goal done, moving its current value to the target.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown goal, or the store error.
    pub async fn mark_complete(&self, goal_id: &str) -> Result<()> {
        let mut goal = self.goal(goal_id)?;
        goal.mark_complete();
        self.write_progress(&goal, "Goal completed!").await
    }

    /// # Errors
    /// Returns the store error.
    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let outcome = self.ctx.store.delete(&self.paths.goal(goal_id)).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Goal removed!", |state| {
            if state.selected.as_deref() == Some(goal_id) {
                state.selected = None;
            }
        });
        outcome
    }

    async fn write_progress(&self, goal: &Goal, message: &str) -> Result<()> {
        let update = fields([
            ("currentValue", Value::from(goal.current_value)),
            ("completed", Value::Bool(goal.completed)),
        ]);
        let outcome = self.ctx.store.update(&self.paths.goal(&goal.id), update).await;
        self.ctx.report(&self.scope, &self.state, &outcome, message, |_| {});
        if outcome.is_ok() {
            info!(goal_id = %goal.id, current = goal.current_value, completed = goal.completed, "goal progress saved");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_requires_title_target_and_unit() {
        let err = GoalForm::default().into_goal().unwrap_err();
        assert_eq!(err.fields(), &[FormField::Title, FormField::TargetValue, FormField::Unit]);
    }

    #[test]
    fn form_rejects_malformed_and_zero_targets() {
        let form = GoalForm {
            title: "Read".to_string(),
            target: "ten".to_string(),
            unit: "pages".to_string(),
            ..GoalForm::default()
        };
        assert_eq!(form.clone().into_goal().unwrap_err().fields(), &[FormField::TargetValue]);

        let zero = GoalForm { target: "0".to_string(), ..form };
        assert_eq!(zero.into_goal().unwrap_err().fields(), &[FormField::TargetValue]);
    }

    #[test]
    fn form_builds_long_term_goal() {
        let goal = GoalForm {
            title: "Finish thesis".to_string(),
            description: " chapters ".to_string(),
            target: "12".to_string(),
            unit: "chapters".to_string(),
            kind: GoalKind::LongTerm,
            target_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        }
        .into_goal()
        .expect("form should be valid");
        assert_eq!(goal.kind, GoalKind::LongTerm);
        assert_eq!(goal.target_value, 12);
        assert_eq!(goal.description, "chapters");
    }
}
