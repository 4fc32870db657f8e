//! First-run setup: three pages ending in "Get Started"

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::types::onboarding::toggle_choice;
use studybuddy_domain::{FormField, OnboardingPage, Result, StudyBuddyError, StudyPreferences};
use tracing::{debug, info, warn};

use crate::screen::{clear_if_expired, Banner, ScreenContext, ScreenScope};
use crate::store::{encode_fields, fields, UserPaths};

/// Page and choices of the setup flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingState {
    pub page: OnboardingPage,
    pub preferences: StudyPreferences,
    pub invalid_fields: Vec<FormField>,
    pub saving: bool,
    pub completed: bool,
    pub banner: Option<Banner>,
}

impl OnboardingState {
    /// Fill of the progress bar.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.page.progress()
    }

    /// Whether the Back button is shown.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.page.previous().is_some()
    }

    /// Whether the Next / Get Started button is enabled.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.preferences.allows_leaving(self.page)
    }
}

/// Controller of the first-run setup flow
pub struct OnboardingController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<OnboardingState>>,
}

impl OnboardingController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("onboarding"),
            state: Arc::new(RwLock::new(OnboardingState::default())),
        })
    }

    /// Stop applying results to this screen.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the current page and choices.
    pub fn state(&self) -> OnboardingState {
        self.state.read().clone()
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Pick the single academic level.
    pub fn select_academic_level(&self, level: impl Into<String>) {
        let mut state = self.state.write();
        state.preferences.academic_level = level.into();
        state.invalid_fields.retain(|field| *field != FormField::AcademicLevel);
    }

    /// Select or deselect a study method.
    pub fn toggle_study_method(&self, method: &str) {
        toggle_choice(&mut self.state.write().preferences.study_methods, method);
    }

    /// Select or deselect a subject of interest.
    pub fn toggle_subject(&self, subject: &str) {
        toggle_choice(&mut self.state.write().preferences.subjects, subject);
    }

    /// Select or deselect a goal preference.
    pub fn toggle_goal(&self, goal: &str) {
        let mut state = self.state.write();
        toggle_choice(&mut state.preferences.goals, goal);
        state.invalid_fields.retain(|field| *field != FormField::GoalPreferences);
    }

    /// Return to the previous page. Choices are kept.
    pub fn back(&self) {
        let mut state = self.state.write();
        if let Some(previous) = state.page.previous() {
            state.page = previous;
            state.invalid_fields.clear();
        }
    }

    /// Move to the next page.
    ///
    /// # Errors
    /// Returns a validation error when the current page is missing its
    /// required choice, or when already on the last page (use
    /// [`Self::complete`] there).
    pub fn next(&self) -> Result<OnboardingPage> {
        let mut state = self.state.write();
        if let Err(err) = state.preferences.check_page(state.page) {
            state.invalid_fields = err.fields().to_vec();
            return Err(err);
        }
        let Some(next) = state.page.next() else {
            return Err(StudyBuddyError::validation("Setup is on its last page.", Vec::new()));
        };
        debug!(from = state.page.index(), to = next.index(), "onboarding page");
        state.page = next;
        state.invalid_fields.clear();
        Ok(next)
    }

    /// "Get Started": store the choices as `preferences` on the user
    /// document and mark the flow completed.
    ///
    /// # Errors
    /// Returns a validation error when not on the last page or a required
    /// choice is missing; otherwise the store error.
    pub async fn complete(&self) -> Result<()> {
        let preferences = {
            let mut state = self.state.write();
            let checked = if state.page.is_last() {
                [OnboardingPage::Personalize, OnboardingPage::Goals]
                    .into_iter()
                    .try_for_each(|page| state.preferences.check_page(page))
            } else {
                Err(StudyBuddyError::validation("Finish every setup page first.", Vec::new()))
            };
            if let Err(err) = checked {
                state.invalid_fields = err.fields().to_vec();
                state.banner = Some(self.ctx.error_banner(&err));
                return Err(err);
            }
            state.saving = true;
            state.preferences.clone()
        };

        let outcome = match encode_fields(&preferences) {
            Ok(encoded) => {
                self.ctx
                    .store
                    .update(&self.paths.profile(), fields([("preferences", Value::Object(encoded))]))
                    .await
            }
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(()) => info!(
                uid = self.paths.uid(),
                level = %preferences.academic_level,
                goals = preferences.goals.len(),
                "onboarding completed"
            ),
            Err(err) => warn!(error = %err, "failed to save onboarding preferences"),
        }
        if self.scope.is_mounted() {
            let mut state = self.state.write();
            state.saving = false;
            match &outcome {
                Ok(()) => state.completed = true,
                Err(err) => state.banner = Some(self.ctx.error_banner(err)),
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use studybuddy_domain::types::onboarding::{ACADEMIC_LEVELS, GOAL_PREFERENCES};

    use super::*;

    #[test]
    fn state_reports_button_availability() {
        let mut state = OnboardingState::default();
        assert!(!state.can_go_back());
        assert!(state.can_advance());

        state.page = OnboardingPage::Personalize;
        assert!(state.can_go_back());
        assert!(!state.can_advance());
        state.preferences.academic_level = ACADEMIC_LEVELS[0].to_string();
        assert!(state.can_advance());

        state.page = OnboardingPage::Goals;
        assert!(!state.can_advance());
        state.preferences.goals.push(GOAL_PREFERENCES[0].to_string());
        assert!(state.can_advance());
        assert!((state.progress() - 1.0).abs() < 1e-9);
    }
}
