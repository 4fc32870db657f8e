//! Collaborators handed to every screen controller

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use studybuddy_domain::{Config, Result, StudyBuddyError, UserProfile};
use tracing::warn;

use super::banner::{Banner, BannerKind, BannerSlot};
use super::clock::Clock;
use super::lifecycle::ScreenScope;
use crate::auth::IdentityProvider;
use crate::notifications::Notifier;
use crate::store::{DocumentStore, UserPaths};

/// Explicit dependencies of a screen: identity, store, notifier, clock and
/// configuration. Cheap to clone.
#[derive(Clone)]
pub struct ScreenContext {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
}

impl ScreenContext {
    /// Bundle the collaborators.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: Arc<Config>,
    ) -> Self {
        Self { identity, store, notifier, clock, config }
    }

    /// Paths of the signed-in user's data.
    ///
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` when nobody is signed in.
    pub fn user_paths(&self) -> Result<UserPaths> {
        let uid = self.identity.current_user_id().ok_or(StudyBuddyError::NotAuthenticated)?;
        Ok(UserPaths::new(self.config.store.users_collection.clone(), uid))
    }

    /// Read `users/{uid}`; a missing document reads as defaults.
    ///
    /// # Errors
    /// Returns the store error or a decode failure.
    pub async fn load_profile(&self, paths: &UserPaths) -> Result<UserProfile> {
        let mut profile = match self.store.get(&paths.profile()).await? {
            Some(doc) => doc.decode::<UserProfile>()?,
            None => UserProfile::default(),
        };
        profile.uid = paths.uid().to_string();
        Ok(profile)
    }

    /// Collection holding the user documents.
    pub fn users_collection(&self) -> &str {
        &self.config.store.users_collection
    }

    /// Display time of banners.
    pub fn banner_ttl(&self) -> Duration {
        self.config.ui.error_banner_ttl()
    }

    /// Banner of `kind` shown now.
    pub fn banner(&self, kind: BannerKind, message: impl Into<String>) -> Banner {
        Banner::new(kind, message, self.clock.instant(), self.banner_ttl())
    }

    /// Error banner for `error` shown now.
    pub fn error_banner(&self, error: &StudyBuddyError) -> Banner {
        Banner::from_error(error, self.clock.instant(), self.banner_ttl())
    }

    /// Show the outcome of a user action on a mounted screen.
    ///
    /// On success `on_success` runs and the `success` banner is shown; on
    /// failure the error banner is. Nothing happens once `scope` is disposed.
    pub fn report<S, T>(
        &self,
        scope: &ScreenScope,
        state: &RwLock<S>,
        outcome: &Result<T>,
        success: &str,
        on_success: impl FnOnce(&mut S),
    ) where
        S: BannerSlot,
    {
        if !scope.is_mounted() {
            return;
        }
        let mut state = state.write();
        let banner = match outcome {
            Ok(_) => {
                on_success(&mut state);
                self.banner(BannerKind::Success, success)
            }
            Err(err) => {
                warn!(screen = scope.name(), error = %err, "screen action failed");
                self.error_banner(err)
            }
        };
        *state.banner_slot() = Some(banner);
    }
}

impl std::fmt::Debug for ScreenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenContext").field("config", &self.config).finish_non_exhaustive()
    }
}
