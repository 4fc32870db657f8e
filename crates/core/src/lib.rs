//! # StudyBuddy Core
//!
//! Screen controllers and the ports they talk through. No storage, identity
//! or platform code lives here.
//!
//! This crate contains:
//! - Port interfaces (document store, identity provider, notifier)
//! - Screen plumbing: context, lifecycle scope, banners, clock
//! - One controller per screen, each exposing a cloneable state snapshot
//!
//! ## Architecture Principles
//! - Only depends on `studybuddy-domain`
//! - All external collaborators via traits
//! - Listener registrations are owned by the screen that created them

pub mod analytics;
pub mod auth;
pub mod goals;
pub mod help;
pub mod home;
pub mod notes;
pub mod notifications;
pub mod onboarding;
pub mod schedule;
pub mod screen;
pub mod settings;
pub mod store;
pub mod tasks;

pub use analytics::AnalyticsController;
pub use auth::{IdentityProvider, LoginController, SignUpController};
pub use goals::{GoalsController, ProgressController};
pub use help::HelpController;
pub use home::HomeController;
pub use notes::NotesController;
pub use notifications::{LocalNotification, Notifier, PermissionState};
pub use onboarding::OnboardingController;
pub use schedule::ScheduleController;
pub use screen::{Clock, ScreenContext, ScreenScope, SystemClock};
pub use settings::SettingsController;
pub use store::{Document, DocumentPath, DocumentStore, ListenerRegistration, Query};
pub use tasks::TaskTrackerController;
