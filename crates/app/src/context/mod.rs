//! Application context - dependency injection container

use std::sync::Arc;

use studybuddy_core::notifications::send_signup_welcome;
use studybuddy_core::{
    AnalyticsController, Clock, DocumentStore, GoalsController, HelpController, HomeController,
    IdentityProvider, LoginController, NotesController, Notifier, OnboardingController,
    ProgressController, ScheduleController, ScreenContext, SettingsController, SignUpController,
    SystemClock, TaskTrackerController,
};
use studybuddy_domain::{Config, Result, Theme};
use studybuddy_infra::{InMemoryDocumentStore, InMemoryIdentityProvider, RecordingNotifier};
use tracing::{debug, info, warn};

use crate::navigation::Navigator;
use crate::utils::logging::error_label;

/// Type alias for identity provider port trait object
type DynIdentityProvider = dyn IdentityProvider + 'static;

/// Type alias for document store port trait object
type DynDocumentStore = dyn DocumentStore + 'static;

/// Type alias for notifier port trait object
type DynNotifier = dyn Notifier + 'static;

/// Type alias for clock trait object
type DynClock = dyn Clock + 'static;

/// Application context - holds the adapters every screen is built from
pub struct AppContext {
    pub config: Arc<Config>,
    pub identity: Arc<DynIdentityProvider>,
    pub store: Arc<DynDocumentStore>,
    pub notifier: Arc<DynNotifier>,
    pub clock: Arc<DynClock>,
}

impl AppContext {
    /// Load configuration (environment, then config file, then defaults)
    /// and build the context with in-process adapters.
    ///
    /// # Errors
    /// Returns `StudyBuddyError::Config` when the configuration is invalid.
    pub fn new() -> Result<Self> {
        let config = studybuddy_infra::config::load()?;
        Ok(Self::new_with_config(config))
    }

    /// Build the context from `config` with in-process adapters and the
    /// system clock.
    #[must_use]
    pub fn new_with_config(config: Config) -> Self {
        Self::with_adapters(
            config,
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(SystemClock),
        )
    }

    /// Build the context from explicit adapters.
    pub fn with_adapters(
        config: Config,
        identity: Arc<DynIdentityProvider>,
        store: Arc<DynDocumentStore>,
        notifier: Arc<DynNotifier>,
        clock: Arc<DynClock>,
    ) -> Self {
        info!(
            users_collection = %config.store.users_collection,
            signup_welcome = config.notifications.signup_welcome,
            "application context created"
        );
        Self { config: Arc::new(config), identity, store, notifier, clock }
    }

    /// Collaborators handed to every controller.
    #[must_use]
    pub fn screen_context(&self) -> ScreenContext {
        ScreenContext::new(
            Arc::clone(&self.identity),
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
            Arc::clone(&self.config),
        )
    }

    /// Whether the identity provider has a current user.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.current_user_id().is_some()
    }

    /// Navigator starting on the route matching the current session.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.is_signed_in())
    }

    /// Login screen controller.
    #[must_use]
    pub fn login(&self) -> LoginController {
        LoginController::new(self.screen_context())
    }

    /// Sign-up screen controller.
    #[must_use]
    pub fn sign_up(&self) -> SignUpController {
        SignUpController::new(self.screen_context())
    }

    /// Help & support screen controller; available signed in or out.
    #[must_use]
    pub fn help(&self) -> HelpController {
        debug!(signed_in = self.is_signed_in(), "help opened");
        HelpController::new()
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn onboarding(&self) -> Result<OnboardingController> {
        OnboardingController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn home(&self) -> Result<HomeController> {
        HomeController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn progress(&self) -> Result<ProgressController> {
        ProgressController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn goals(&self) -> Result<GoalsController> {
        GoalsController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn tasks(&self) -> Result<TaskTrackerController> {
        TaskTrackerController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn schedule(&self) -> Result<ScheduleController> {
        ScheduleController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn notes(&self) -> Result<NotesController> {
        NotesController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn settings(&self) -> Result<SettingsController> {
        SettingsController::new(self.screen_context())
    }

    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub fn analytics(&self) -> Result<AnalyticsController> {
        AnalyticsController::new(self.screen_context())
    }

    /// Theme stored on the signed-in user's document. Falls back to light
    /// when signed out or when the document cannot be read.
    pub async fn load_theme(&self) -> Theme {
        let ctx = self.screen_context();
        let Ok(paths) = ctx.user_paths() else {
            return Theme::default();
        };
        match ctx.load_profile(&paths).await {
            Ok(profile) => profile.theme,
            Err(err) => {
                warn!(error = %err, label = error_label(&err), "failed to load theme");
                Theme::default()
            }
        }
    }

    /// Wait out the sign-up success banner, enter setup, then post the
    /// welcome notification. Returns whether it was posted.
    ///
    /// Notification failures are logged, never surfaced: the account exists
    /// either way.
    pub async fn finish_sign_up(&self, navigator: &mut Navigator) -> bool {
        let delay = self.config.ui.success_redirect_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        navigator.on_sign_up_success();

        match send_signup_welcome(self.notifier.as_ref(), &self.config.notifications).await {
            Ok(posted) => posted,
            Err(err) => {
                warn!(error = %err, label = error_label(&err), "welcome notification failed");
                false
            }
        }
    }

    /// Save the setup choices and move on to the home tab. The route stays
    /// on setup when saving fails.
    ///
    /// # Errors
    /// Returns the validation or store error from
    /// [`OnboardingController::complete`].
    pub async fn complete_onboarding(
        &self,
        screen: &OnboardingController,
        navigator: &mut Navigator,
    ) -> Result<()> {
        screen.complete().await?;
        screen.dispose();
        navigator.on_onboarding_complete();
        Ok(())
    }

    /// Build and mount the four tab screens of the main route.
    ///
    /// # Errors
    /// Returns `StudyBuddyError::NotAuthenticated` without a signed-in user.
    pub async fn open_main(&self) -> Result<MainScreens> {
        let screens = MainScreens {
            home: self.home()?,
            progress: self.progress()?,
            schedule: self.schedule()?,
            settings: self.settings()?,
        };

        screens.progress.mount();
        screens.schedule.mount();
        futures::join!(screens.home.mount(), screens.settings.mount());
        debug!("main screens mounted");
        Ok(screens)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("signed_in", &self.is_signed_in())
            .finish_non_exhaustive()
    }
}

/// Controllers behind the main route's tabs
pub struct MainScreens {
    pub home: HomeController,
    pub progress: ProgressController,
    pub schedule: ScheduleController,
    pub settings: SettingsController,
}

impl MainScreens {
    /// Release every tab's listeners.
    pub fn dispose(&self) {
        self.home.dispose();
        self.progress.dispose();
        self.schedule.dispose();
        self.settings.dispose();
    }

    /// Sign out from the settings tab, release every screen and return to
    /// login.
    ///
    /// # Errors
    /// Returns the identity provider error; nothing is disposed then.
    pub async fn logout(self, navigator: &mut Navigator) -> Result<()> {
        self.settings.logout().await?;
        self.dispose();
        navigator.on_logout();
        Ok(())
    }
}
