//! State of a list fed by a live query

use studybuddy_domain::Result;
use tracing::warn;

/// Items of a live query plus its loading and error state
#[derive(Debug, Clone, PartialEq)]
pub struct LiveList<T> {
    pub items: Vec<T>,
    /// True until the first snapshot (or error) arrives.
    pub loading: bool,
    /// Message of the error that ended the subscription, if any.
    pub error: Option<String>,
}

impl<T> Default for LiveList<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl<T> LiveList<T> {
    /// Apply one delivery. An error keeps the last good items on screen.
    pub fn apply(&mut self, snapshot: Result<Vec<T>>) {
        self.loading = false;
        match snapshot {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "live query failed");
                self.error = Some(err.user_message());
            }
        }
    }
}
