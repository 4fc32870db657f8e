//! # StudyBuddy app
//!
//! Application layer: wires adapters into controllers and drives screen
//! navigation.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Navigation between the auth screens and the main tabs
//! - Logging setup and the headless entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core` and `infra`
//! - Screens only ever see `core` ports; adapters are chosen here

pub mod context;
pub mod navigation;
pub mod utils;

pub use context::{AppContext, MainScreens};
pub use navigation::{Navigator, Route, Tab};
