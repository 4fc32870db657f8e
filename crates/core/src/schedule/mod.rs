//! Study schedule screen: session form with picker-driven duration and the
//! live session list

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use studybuddy_domain::{
    compute_duration, format_time_of_day, sort_sessions, FormField, NewSession, Result, Session,
};
use tracing::info;

use crate::screen::{clear_if_expired, Banner, BannerSlot, LiveList, ScreenContext, ScreenScope};
use crate::store::{encode_fields, Query, UserPaths};

/// Banner after a session was stored.
pub const SESSION_ADDED_MESSAGE: &str = "Study session added!";

/// Session form and list of the schedule screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleState {
    pub form: NewSession,
    pub invalid_fields: Vec<FormField>,
    /// Sessions in date order.
    pub sessions: LiveList<Session>,
    pub banner: Option<Banner>,
}

impl BannerSlot for ScheduleState {
    fn banner_slot(&mut self) -> &mut Option<Banner> {
        &mut self.banner
    }
}

/// Controller of the schedule screen
pub struct ScheduleController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<ScheduleState>>,
}

impl ScheduleController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("schedule"),
            state: Arc::new(RwLock::new(ScheduleState::default())),
        })
    }

    /// Start the live query on the user's sessions.
    pub fn mount(&self) {
        let state = Arc::clone(&self.state);
        self.scope.watch::<Session, _>(
            self.ctx.store.as_ref(),
            &self.paths.sessions(),
            Query::new(),
            move |snapshot| state.write().sessions.apply(snapshot.map(|sessions| sort_sessions(&sessions))),
        );
    }

    /// Release the sessions listener.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the form and session list.
    pub fn state(&self) -> ScheduleState {
        self.state.read().clone()
    }

    /// Drop the banner once its display time is over.
    pub fn clear_expired_banner(&self) {
        clear_if_expired(&mut self.state.write().banner, self.ctx.clock.instant());
    }

    /// Subject field.
    pub fn set_subject(&self, value: impl Into<String>) {
        self.state.write().form.subject = value.into();
    }

    /// Value from the date picker.
    pub fn pick_date(&self, date: NaiveDate) {
        self.state.write().form.date = date.format("%Y-%m-%d").to_string();
    }

    /// Value from the start time picker; recomputes the duration.
    pub fn pick_start_time(&self, hour: u32, minute: u32) {
        let mut state = self.state.write();
        state.form.start_time = format_time_of_day(hour, minute);
        Self::recompute_duration(&mut state.form);
    }

    /// Value from the end time picker; recomputes the duration.
    pub fn pick_end_time(&self, hour: u32, minute: u32) {
        let mut state = self.state.write();
        state.form.end_time = format_time_of_day(hour, minute);
        Self::recompute_duration(&mut state.form);
    }

    /// Manual edit of the duration field.
    pub fn set_duration(&self, value: impl Into<String>) {
        self.state.write().form.duration = value.into();
    }

    fn recompute_duration(form: &mut NewSession) {
        if !form.start_time.is_empty() && !form.end_time.is_empty() {
            form.duration = compute_duration(&form.start_time, &form.end_time);
        }
    }

    /// # Errors
    /// Returns the validation error (fields flagged) or the store error.
    pub async fn add_session(&self) -> Result<String> {
        let form = self.state.read().form.clone();
        let session = match form.into_session() {
            Ok(session) => session,
            Err(err) => {
                let mut state = self.state.write();
                state.invalid_fields = err.fields().to_vec();
                state.banner = Some(self.ctx.error_banner(&err));
                return Err(err);
            }
        };

        let outcome = self.ctx.store.add(&self.paths.sessions(), encode_fields(&session)?).await;
        self.ctx.report(&self.scope, &self.state, &outcome, SESSION_ADDED_MESSAGE, |state| {
            state.form = NewSession::default();
            state.invalid_fields.clear();
        });
        if let Ok(id) = &outcome {
            info!(session_id = %id, subject = %session.subject, "study session added");
        }
        outcome
    }

    /// # Errors
    /// Returns the store error.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let outcome = self.ctx.store.delete(&self.paths.session(session_id)).await;
        self.ctx.report(&self.scope, &self.state, &outcome, "Study session removed.", |_| {});
        outcome
    }
}
