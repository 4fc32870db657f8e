//! Progress analytics screen: weekly study hours and goal counts

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use studybuddy_domain::utils::analytics::{encouragement, weekly_stats, WeeklyStats};
use studybuddy_domain::{Goal, Result, Session};

use crate::screen::{LiveList, ScreenContext, ScreenScope};
use crate::store::{Query, UserPaths};

/// Sessions and goals feeding the analytics screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsState {
    pub sessions: LiveList<Session>,
    pub goals: LiveList<Goal>,
}

impl AnalyticsState {
    /// Whether either live query is still waiting for its first snapshot.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.sessions.loading || self.goals.loading
    }

    /// Weekly statistics for the week containing `today`.
    #[must_use]
    pub fn weekly(&self, today: NaiveDate) -> WeeklyStats {
        weekly_stats(&self.sessions.items, &self.goals.items, today)
    }
}

/// Controller of the progress analytics screen
pub struct AnalyticsController {
    ctx: ScreenContext,
    paths: UserPaths,
    scope: ScreenScope,
    state: Arc<RwLock<AnalyticsState>>,
}

impl AnalyticsController {
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn new(ctx: ScreenContext) -> Result<Self> {
        let paths = ctx.user_paths()?;
        Ok(Self {
            ctx,
            paths,
            scope: ScreenScope::new("analytics"),
            state: Arc::new(RwLock::new(AnalyticsState::default())),
        })
    }

    /// Start the live session and goal queries.
    pub fn mount(&self) {
        let sessions_state = Arc::clone(&self.state);
        self.scope.watch::<Session, _>(
            self.ctx.store.as_ref(),
            &self.paths.sessions(),
            Query::new(),
            move |snapshot| sessions_state.write().sessions.apply(snapshot),
        );

        let goals_state = Arc::clone(&self.state);
        self.scope.watch::<Goal, _>(
            self.ctx.store.as_ref(),
            &self.paths.goals(),
            Query::new(),
            move |snapshot| goals_state.write().goals.apply(snapshot),
        );
    }

    /// Release both listeners.
    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Snapshot of the loaded sessions and goals.
    pub fn state(&self) -> AnalyticsState {
        self.state.read().clone()
    }

    /// Statistics for the current week.
    pub fn weekly(&self) -> WeeklyStats {
        self.state.read().weekly(self.ctx.clock.now().date_naive())
    }

    /// Motivational line for this week's numbers.
    pub fn encouragement(&self) -> &'static str {
        encouragement(&self.weekly())
    }
}
