//! Home screen: greeting, open goals, next sessions, calendar and profile
//! popup

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde_json::Value;
use studybuddy_domain::utils::calendar::MonthGrid;
use studybuddy_domain::{upcoming_sessions, FormField, Goal, Result, Session, StudyBuddyError};
use tracing::{debug, info, warn};

use crate::screen::{clear_if_expired, Banner, BannerKind, LiveList, ScreenContext, ScreenScope};
use crate::store::{fields, Query, UserPaths};

/// Banner after the profile popup saved a new username.
pub const USERNAME_UPDATED_MESSAGE: &str = "Username updated!";
/// Inline error when the username could not be saved.
pub const USERNAME_SAVE_FAILED_MESSAGE: &str = "Failed to save username";

/// Profile popup (username/email with inline username editing)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePopup {
    pub open: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub editable_username: String,
    pub saving: bool,
    pub save_error: Option<String>,
    pub save_success: bool,
}

/// Greeting, goals, sessions, calendar and profile popup of the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub username: Option<String>,
    pub username_loading: bool,
    pub username_error: Option<String>,
    /// Goals not completed yet.
    pub goals: LiveList<Goal>,
    /// Next sessions in date order, already limited.
    pub sessions: LiveList<Session>,
    pub calendar: MonthGrid,
    pub selected_date: NaiveDate,
    pub profile: ProfilePopup,
    pub banner: Option<Banner>,
}

impl HomeState {
    fn new(today: NaiveDate) -> Self {
        Self {
            username: None,
            username_loading: false,
            username_error: None,
            goals: LiveList::default(),
            sessions: LiveList::default(),
            calendar: MonthGrid::for_date(today),
            selected_date: today,
            profile: ProfilePopup::default(),
            banner: None,
        }
    }

    /// "Student" until a username is known.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        self.username.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or("Student")
    }
}

/// Controller of the home screen
pub struct HomeController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<HomeState>>,
}

impl HomeController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        let today = ctx.clock.now().date_naive();
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("home"),
            state: Arc::new(RwLock::new(HomeState::new(today))),
        })
    }

    /// Start the goal and session listeners, then load the username.
    pub async fn mount(&self) {
        let goals_state = Arc::clone(&self.state);
        self.scope.watch::<Goal, _>(
            self.ctx.store.as_ref(),
            &self.paths.goals(),
            Query::new().where_eq("completed", false),
            move |snapshot| goals_state.write().goals.apply(snapshot),
        );

        let limit = self.ctx.config.ui.home_session_limit;
        let sessions_state = Arc::clone(&self.state);
        self.scope.watch::<Session, _>(
            self.ctx.store.as_ref(),
            &self.paths.sessions(),
            Query::new(),
            move |snapshot| {
                sessions_state
                    .write()
                    .sessions
                    .apply(snapshot.map(|sessions| upcoming_sessions(&sessions, limit)));
            },
        );

        self.load_username().await;
    }

    /// Release the goal and session listeners.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the screen state.
    pub fn state(&self) -> HomeState {
        self.state.read().clone()
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    async fn load_username(&self) {
        self.state.write().username_loading = true;
        let outcome = self.ctx.load_profile(&self.paths).await;
        if !self.scope.is_mounted() {
            return;
        }
        let mut state = self.state.write();
        state.username_loading = false;
        match outcome {
            Ok(profile) => state.username = profile.username,
            Err(err) => {
                warn!(error = %err, "failed to load username");
                state.username_error = Some("Failed to load username".to_string());
            }
        }
    }

    /// Mark a goal (in)complete; completed goals drop out of the home list.
    ///
    /// # Errors
    /// Returns the store error.
    pub async fn set_goal_completed(&self, goal_id: &str, completed: bool) -> Result<()> {
        let outcome = self
            .ctx
            .store
            .update(&self.paths.goal(goal_id), fields([("completed", Value::Bool(completed))]))
            .await;
        if let Err(err) = &outcome {
            warn!(goal_id, error = %err, "failed to update goal from home");
            if self.scope.is_mounted() {
                self.state.write().banner = Some(self.ctx.error_banner(err));
            }
        }
        outcome
    }

    /// Highlight a calendar day.
    pub fn select_date(&self, date: NaiveDate) {
        let mut state = self.state.write();
        state.selected_date = date;
        if state.calendar.first != MonthGrid::for_date(date).first {
            state.calendar = MonthGrid::for_date(date);
        }
    }

    /// Show the following month.
    pub fn next_month(&self) {
        let mut state = self.state.write();
        state.calendar = state.calendar.next();
    }

    /// Show the preceding month.
    pub fn previous_month(&self) {
        let mut state = self.state.write();
        state.calendar = state.calendar.previous();
    }

    /// Open the profile popup and fetch username and email.
    pub async fn open_profile(&self) {
        {
            let mut state = self.state.write();
            state.profile = ProfilePopup { open: true, loading: true, ..ProfilePopup::default() };
        }

        let outcome = self.ctx.load_profile(&self.paths).await;
        if !self.scope.is_mounted() {
            return;
        }
        let mut state = self.state.write();
        state.profile.loading = false;
        match outcome {
            Ok(profile) => {
                state.profile.editable_username = profile.username.clone().unwrap_or_default();
                state.profile.email = profile.email;
                state.profile.username.clone_from(&profile.username);
                state.username = profile.username;
            }
            Err(err) => {
                warn!(error = %err, "failed to load user info");
                state.profile.error = Some("Failed to load user info".to_string());
            }
        }
    }

    /// Hide the profile popup without saving.
    pub fn close_profile(&self) {
        self.state.write().profile.open = false;
    }

    /// Username field of the profile popup.
    pub fn set_editable_username(&self, value: impl Into<String>) {
        self.state.write().profile.editable_username = value.into();
    }

    /// Save the edited username (trimmed). A blank name is not saved.
    ///
    /// # Errors
    /// Returns a validation error for a blank name, or the store error.
    pub async fn save_username(&self) -> Result<()> {
        let username = self.state.read().profile.editable_username.trim().to_string();
        if username.is_empty() {
            debug!("blank username not saved");
            return Err(StudyBuddyError::validation(
                "Username cannot be empty.",
                [FormField::Username],
            ));
        }

        {
            let mut state = self.state.write();
            state.profile.saving = true;
            state.profile.save_error = None;
            state.profile.save_success = false;
        }

        let outcome = self
            .ctx
            .store
            .update(&self.paths.profile(), fields([("username", Value::String(username.clone()))]))
            .await;
        if !self.scope.is_mounted() {
            return outcome;
        }

        let mut state = self.state.write();
        state.profile.saving = false;
        match &outcome {
            Ok(()) => {
                info!(uid = self.paths.uid(), "username updated");
                state.profile.username = Some(username.clone());
                state.profile.save_success = true;
                state.username = Some(username);
                state.banner = Some(self.ctx.banner(BannerKind::Success, USERNAME_UPDATED_MESSAGE));
            }
            Err(err) => {
                warn!(error = %err, "failed to save username");
                state.profile.save_error = Some(USERNAME_SAVE_FAILED_MESSAGE.to_string());
            }
        }
        outcome
    }
}
