//! Port interfaces for the identity provider

use async_trait::async_trait;
use studybuddy_domain::Result;

/// Trait for email/password account management
///
/// Failures are reported as `StudyBuddyError::Auth` carrying the provider's
/// own message, which screens show verbatim.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in; returns the new user id.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String>;

    /// Sign in with email and password; returns the user id.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String>;

    async fn sign_out(&self) -> Result<()>;

    /// The signed-in user, if any.
    fn current_user_id(&self) -> Option<String>;
}
