//! Time source for controllers
//!
//! Wall-clock time drives task status derivation; monotonic instants drive
//! banner expiry. Tests swap in [`MockClock`] to control both.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use studybuddy_core::screen::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.instant();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.instant().duration_since(start), Duration::from_secs(5));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Source of wall-clock and monotonic time
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Monotonic timestamp for measuring display durations
    fn instant(&self) -> Instant;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests
#[derive(Debug, Clone)]
pub struct MockClock {
    start_instant: Instant,
    start_time: DateTime<Utc>,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// A clock frozen at the current real time.
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// A clock frozen at `time`.
    #[must_use]
    pub fn at(time: DateTime<Utc>) -> Self {
        Self { start_instant: Instant::now(), start_time: time, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Move both clocks forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = *self.elapsed.lock();
        chrono::Duration::from_std(elapsed).map_or(self.start_time, |delta| self.start_time + delta)
    }

    fn instant(&self) -> Instant {
        self.start_instant + *self.elapsed.lock()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn mock_clock_moves_both_timelines() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().expect("valid timestamp");
        let clock = MockClock::at(start);
        let before = clock.instant();

        clock.advance(Duration::from_secs(90));

        assert_eq!(clock.now(), start + chrono::Duration::seconds(90));
        assert_eq!(clock.instant().duration_since(before), Duration::from_secs(90));
    }
}
