//! # StudyBuddy Domain
//!
//! Business domain types and models for StudyBuddy.
//!
//! This crate contains:
//! - Domain data types (Goal, Task, Session, StudyNote, UserProfile)
//! - The goal/task progress model (completion rule, status derivation)
//! - Pure filter/sort views and display helpers
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other StudyBuddy crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
