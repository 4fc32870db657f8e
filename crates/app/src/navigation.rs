//! Screen routes and the transitions between them

use std::fmt;

use tracing::{debug, info};

/// Bottom navigation tabs of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Progress,
    Schedule,
    Settings,
}

impl Tab {
    /// Tabs in bottom-bar order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Progress, Self::Schedule, Self::Settings];

    /// Caption under the tab icon.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Progress => "Progress",
            Self::Schedule => "Schedule",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Screens the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    SignUp,
    /// First-run setup shown once after sign-up.
    Onboarding,
    Main(Tab),
    /// Help & support, remembering the tab to return to.
    Help(Tab),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::SignUp => f.write_str("signup"),
            Self::Onboarding => f.write_str("onboarding"),
            Self::Main(tab) => write!(f, "main/{}", tab.label().to_lowercase()),
            Self::Help(_) => f.write_str("help"),
        }
    }
}

/// Current route plus the allowed transitions.
///
/// Auth screens lead to each other; login leads into the main screen and
/// sign-up into setup, which ends on the main screen. Help opens from and
/// returns to a main tab. Every signed-in route leads back to login through
/// logout. Transitions that do not apply to the current route are ignored.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    /// Start on the home tab when a user is already signed in, otherwise on
    /// login.
    #[must_use]
    pub fn new(signed_in: bool) -> Self {
        let current = if signed_in { Route::Main(Tab::Home) } else { Route::Login };
        Self { current }
    }

    /// Route currently shown.
    #[must_use]
    pub fn current(&self) -> Route {
        self.current
    }

    /// Whether the current route belongs to a signed-in user.
    #[must_use]
    pub fn is_signed_in_route(&self) -> bool {
        matches!(self.current, Route::Main(_) | Route::Onboarding | Route::Help(_))
    }

    /// Login's "Sign up" link.
    pub fn to_sign_up(&mut self) {
        if self.current == Route::Login {
            self.go(Route::SignUp);
        }
    }

    /// Sign-up's "Log in" link.
    pub fn to_login(&mut self) {
        if self.current == Route::SignUp {
            self.go(Route::Login);
        }
    }

    /// Login succeeded: open the home tab.
    pub fn on_login_success(&mut self) {
        if self.current == Route::Login {
            self.go(Route::Main(Tab::Home));
        }
    }

    /// Account created: start the setup flow.
    pub fn on_sign_up_success(&mut self) {
        if self.current == Route::SignUp {
            self.go(Route::Onboarding);
        }
    }

    /// Setup finished with "Get Started": open the home tab.
    pub fn on_onboarding_complete(&mut self) {
        if self.current == Route::Onboarding {
            self.go(Route::Main(Tab::Home));
        }
    }

    /// Open help & support from the current main tab.
    pub fn open_help(&mut self) {
        if let Route::Main(tab) = self.current {
            self.go(Route::Help(tab));
        }
    }

    /// Leave help & support for the tab it was opened from.
    pub fn close_help(&mut self) {
        if let Route::Help(tab) = self.current {
            self.go(Route::Main(tab));
        }
    }

    /// Switch bottom tabs on the main screen.
    pub fn select_tab(&mut self, tab: Tab) {
        if matches!(self.current, Route::Main(_)) {
            self.go(Route::Main(tab));
        } else {
            debug!(%tab, route = %self.current, "tab selection ignored outside the main screen");
        }
    }

    /// Signed out: back to login from any signed-in route.
    pub fn on_logout(&mut self) {
        if self.is_signed_in_route() {
            self.go(Route::Login);
        }
    }

    fn go(&mut self, next: Route) {
        info!(from = %self.current, to = %next, "navigate");
        self.current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_users_start_on_login() {
        assert_eq!(Navigator::new(false).current(), Route::Login);
        assert_eq!(Navigator::new(true).current(), Route::Main(Tab::Home));
    }

    #[test]
    fn auth_screens_link_to_each_other() {
        let mut nav = Navigator::new(false);
        nav.to_sign_up();
        assert_eq!(nav.current(), Route::SignUp);
        nav.to_login();
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn tabs_only_switch_inside_main() {
        let mut nav = Navigator::new(false);
        nav.select_tab(Tab::Schedule);
        assert_eq!(nav.current(), Route::Login);

        nav.on_login_success();
        nav.select_tab(Tab::Schedule);
        assert_eq!(nav.current(), Route::Main(Tab::Schedule));

        nav.on_logout();
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn sign_up_runs_setup_before_home() {
        let mut nav = Navigator::new(false);
        nav.to_sign_up();
        nav.on_sign_up_success();
        assert_eq!(nav.current(), Route::Onboarding);
        assert!(nav.is_signed_in_route());

        nav.select_tab(Tab::Settings);
        assert_eq!(nav.current(), Route::Onboarding);

        nav.on_onboarding_complete();
        assert_eq!(nav.current(), Route::Main(Tab::Home));
        nav.on_onboarding_complete();
        assert_eq!(nav.current(), Route::Main(Tab::Home));
    }

    #[test]
    fn help_returns_to_the_opening_tab() {
        let mut nav = Navigator::new(true);
        nav.select_tab(Tab::Settings);
        nav.open_help();
        assert_eq!(nav.current(), Route::Help(Tab::Settings));
        assert_eq!(nav.current().to_string(), "help");

        nav.select_tab(Tab::Home);
        assert_eq!(nav.current(), Route::Help(Tab::Settings));

        nav.close_help();
        assert_eq!(nav.current(), Route::Main(Tab::Settings));

        nav.open_help();
        nav.on_logout();
        assert_eq!(nav.current(), Route::Login);
        nav.open_help();
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn sign_up_success_from_login_is_ignored() {
        let mut nav = Navigator::new(false);
        nav.on_sign_up_success();
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn route_display_names() {
        assert_eq!(Route::Main(Tab::Progress).to_string(), "main/progress");
        assert_eq!(Route::SignUp.to_string(), "signup");
        assert_eq!(Tab::ALL.map(Tab::label), ["Home", "Progress", "Schedule", "Settings"]);
    }
}
