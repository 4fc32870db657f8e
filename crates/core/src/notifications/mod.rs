//! Local notifications: the port and the sign-up welcome flow

pub mod ports;
pub mod welcome;

pub use ports::{LocalNotification, Notifier, PermissionState};
pub use welcome::{send_signup_welcome, signup_welcome};
