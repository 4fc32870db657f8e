//! In-process email/password identity provider
//!
//! Error messages follow the hosted provider's wording, since screens show
//! them verbatim.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use studybuddy_core::auth::IdentityProvider;
use studybuddy_domain::constants::MIN_PASSWORD_LENGTH;
use studybuddy_domain::utils::validation::is_valid_email;
use studybuddy_domain::{Result, StudyBuddyError};
use tracing::{debug, info};
use uuid::Uuid;

/// Sign-up with a registered email.
pub const EMAIL_IN_USE: &str = "The email address is already in use by another account.";
/// Email without a usable shape.
pub const BADLY_FORMATTED_EMAIL: &str = "The email address is badly formatted.";
/// Password under the minimum length.
pub const WEAK_PASSWORD: &str = "Password should be at least 6 characters";
/// Sign-in with an unknown email.
pub const USER_NOT_FOUND: &str =
    "There is no user record corresponding to this identifier. The user may have been deleted.";
/// Sign-in with the wrong password.
pub const WRONG_PASSWORD: &str = "The password is invalid or the user does not have a password.";
/// Any call while offline.
pub const NETWORK_ERROR: &str =
    "A network error (such as timeout, interrupted connection or unreachable host) has occurred.";

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
}

/// Accounts keyed by lower-cased email.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<String>>,
    offline: AtomicBool,
}

impl InMemoryIdentityProvider {
    /// Provider with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    /// Register an account without signing it in.
    ///
    /// # Errors
    /// Same rules as sign-up.
    pub fn register(&self, email: &str, password: &str) -> Result<String> {
        let key = email.trim().to_lowercase();
        if !is_valid_email(&key) {
            return Err(StudyBuddyError::Auth(BADLY_FORMATTED_EMAIL.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(StudyBuddyError::Auth(WEAK_PASSWORD.to_string()));
        }

        let mut accounts = self.accounts.write();
        if accounts.contains_key(&key) {
            return Err(StudyBuddyError::Auth(EMAIL_IN_USE.to_string()));
        }
        let uid = Uuid::new_v4().simple().to_string();
        accounts.insert(key, Account { uid: uid.clone(), password: password.to_string() });
        debug!(uid = %uid, "account registered");
        Ok(uid)
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.read().len()
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::Acquire) {
            return Err(StudyBuddyError::Auth(NETWORK_ERROR.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String> {
        self.ensure_online()?;
        let uid = self.register(email, password)?;
        *self.current.write() = Some(uid.clone());
        info!(uid = %uid, "account created and signed in");
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        self.ensure_online()?;
        let key = email.trim().to_lowercase();
        if !is_valid_email(&key) {
            return Err(StudyBuddyError::Auth(BADLY_FORMATTED_EMAIL.to_string()));
        }

        let account = self
            .accounts
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| StudyBuddyError::Auth(USER_NOT_FOUND.to_string()))?;
        if account.password != password {
            return Err(StudyBuddyError::Auth(WRONG_PASSWORD.to_string()));
        }

        *self.current.write() = Some(account.uid.clone());
        info!(uid = %account.uid, "signed in");
        Ok(account.uid)
    }

    async fn sign_out(&self) -> Result<()> {
        self.ensure_online()?;
        if let Some(uid) = self.current.write().take() {
            info!(uid = %uid, "signed out");
        }
        Ok(())
    }

    fn current_user_id(&self) -> Option<String> {
        self.current.read().clone()
    }
}
