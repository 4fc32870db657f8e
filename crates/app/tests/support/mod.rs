//! Shared harness for app integration tests
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use studybuddy_app::AppContext;
use studybuddy_core::screen::MockClock;
use studybuddy_domain::Config;
use studybuddy_infra::{InMemoryDocumentStore, InMemoryIdentityProvider, RecordingNotifier};

pub const EMAIL: &str = "ada@example.com";
pub const USERNAME: &str = "ada";
pub const PASSWORD: &str = "secret1";

/// App context plus concrete handles on its in-memory adapters.
pub struct Harness {
    pub app: AppContext,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub store: Arc<InMemoryDocumentStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<MockClock>,
}

/// Defaults with no redirect delay, so sign-up completes immediately.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.ui.success_redirect_ms = 0;
    config
}

/// 2024-03-13 is a Wednesday.
pub fn wednesday_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 13, 12, 0, 0).single().expect("valid timestamp")
}

pub fn harness_with(config: Config, clock: MockClock) -> Harness {
    let identity = Arc::new(InMemoryIdentityProvider::new());
    let store = Arc::new(InMemoryDocumentStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(clock);

    let app = AppContext::with_adapters(
        config,
        identity.clone(),
        store.clone(),
        notifier.clone(),
        clock.clone(),
    );
    Harness { app, identity, store, notifier, clock }
}

pub fn harness() -> Harness {
    harness_with(test_config(), MockClock::at(wednesday_noon()))
}

/// Create the default account through the sign-up screen; it stays
/// signed in.
pub async fn sign_up(harness: &Harness) -> String {
    let screen = harness.app.sign_up();
    screen.set_email(EMAIL);
    screen.set_username(USERNAME);
    screen.set_password(PASSWORD);
    screen.set_retype_password(PASSWORD);
    screen.submit().await.expect("sign up should succeed")
}

/// Harness with the default account signed in.
pub async fn signed_in() -> Harness {
    let harness = harness();
    sign_up(&harness).await;
    harness
}
