//! Transient message banner (snackbar) shared by every screen

use std::time::{Duration, Instant};

use serde::Serialize;
use studybuddy_domain::StudyBuddyError;

/// Tone of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// Message shown for `ttl` from `shown_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub shown_at: Instant,
    pub ttl: Duration,
}

impl Banner {
    /// Banner shown at `shown_at` for `ttl`.
    pub fn new(kind: BannerKind, message: impl Into<String>, shown_at: Instant, ttl: Duration) -> Self {
        Self { kind, message: message.into(), shown_at, ttl }
    }

    /// Error banner carrying the user-facing text of `error`.
    pub fn from_error(error: &StudyBuddyError, shown_at: Instant, ttl: Duration) -> Self {
        Self::new(BannerKind::Error, error.user_message(), shown_at, ttl)
    }

    /// Whether the display time is over at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }

    /// Whether this banner reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

/// Screen state that owns a banner slot.
pub trait BannerSlot {
    /// The banner currently shown by the screen, if any.
    fn banner_slot(&mut self) -> &mut Option<Banner>;
}

/// Drop `banner` once its display time is over.
pub fn clear_if_expired(banner: &mut Option<Banner>, now: Instant) {
    if banner.as_ref().is_some_and(|b| b.is_expired(now)) {
        *banner = None;
    }
}
