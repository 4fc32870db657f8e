//! Notifier adapters

pub mod recording;

pub use recording::RecordingNotifier;
