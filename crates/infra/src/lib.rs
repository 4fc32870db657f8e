//! # StudyBuddy Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - In-memory document store with live queries
//! - In-memory email/password identity provider
//! - Recording notifier
//! - Configuration loading (environment and files)
//!
//! ## Architecture
//! - Implements traits defined in `studybuddy-core`
//! - Depends on `studybuddy-domain` and `studybuddy-core`
//! - Contains all "impure" code (I/O, environment, process state)

pub mod config;
pub mod errors;
pub mod identity;
pub mod notifications;
pub mod store;

// Re-export commonly used items
pub use errors::InfraError;
pub use identity::InMemoryIdentityProvider;
pub use notifications::RecordingNotifier;
pub use store::InMemoryDocumentStore;
