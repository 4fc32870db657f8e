//! Integration tests for AppContext lifecycle
//!
//! The context is built from configuration, hands out controllers for the
//! signed-in user and releases every live query when screens are disposed.

mod support;

use studybuddy_app::{AppContext, Route, Tab};
use studybuddy_core::screen::BannerKind;
use studybuddy_core::IdentityProvider as _;
use studybuddy_domain::{Config, StudyBuddyError, Theme};
use support::{harness, signed_in};

#[tokio::test]
async fn test_default_context_starts_signed_out() {
    // Arrange
    let ctx = AppContext::new_with_config(Config::default());

    // Act
    let navigator = ctx.navigator();

    // Assert
    assert!(!ctx.is_signed_in());
    assert_eq!(navigator.current(), Route::Login);
    assert_eq!(ctx.load_theme().await, Theme::Light);
}

#[tokio::test]
async fn test_user_screens_require_a_session() {
    let harness = harness();

    assert!(matches!(harness.app.home(), Err(StudyBuddyError::NotAuthenticated)));
    assert!(matches!(harness.app.tasks(), Err(StudyBuddyError::NotAuthenticated)));
    assert!(matches!(harness.app.notes(), Err(StudyBuddyError::NotAuthenticated)));
    assert!(matches!(harness.app.analytics(), Err(StudyBuddyError::NotAuthenticated)));
    assert!(matches!(
        harness.app.open_main().await.map(|_| ()),
        Err(StudyBuddyError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_signed_in_context_opens_main_route() {
    let harness = signed_in().await;

    let navigator = harness.app.navigator();

    assert!(harness.app.is_signed_in());
    assert_eq!(navigator.current(), Route::Main(Tab::Home));
}

#[tokio::test]
async fn test_main_screens_release_listeners_on_dispose() {
    // Arrange
    let harness = signed_in().await;

    // Act
    let screens = harness.app.open_main().await.expect("main screens should open");
    let while_open = harness.store.listener_count();
    screens.dispose();

    // Assert
    // home (goals + sessions), progress (goals), schedule (sessions)
    assert_eq!(while_open, 4);
    assert_eq!(harness.store.listener_count(), 0);
}

#[tokio::test]
async fn test_dropping_a_controller_releases_its_listener() {
    let harness = signed_in().await;

    {
        let tasks = harness.app.tasks().expect("signed in");
        tasks.mount();
        assert_eq!(harness.store.listener_count(), 1);
    }

    assert_eq!(harness.store.listener_count(), 0);
}

#[tokio::test]
async fn test_theme_follows_the_user_document() {
    let harness = signed_in().await;
    let settings = harness.app.settings().expect("signed in");
    settings.mount().await;

    settings.set_dark_mode(true).await.expect("theme should save");

    assert_eq!(harness.app.load_theme().await, Theme::Dark);
}

#[tokio::test]
async fn test_unreadable_profile_falls_back_to_light_theme() {
    let harness = signed_in().await;
    harness.store.set_offline(true);

    assert_eq!(harness.app.load_theme().await, Theme::Light);
}

#[tokio::test]
async fn test_revoked_live_query_keeps_last_items() {
    // Arrange
    let harness = signed_in().await;
    let progress = harness.app.progress().expect("signed in");
    progress.mount();
    progress.set_new_goal_text("Outline essay");
    progress.add_goal().await.expect("add").expect("goal created");
    let uid = harness.identity.current_user_id().expect("signed in");

    // Act
    harness.store.fail_listeners(
        &format!("users/{uid}/goals"),
        &StudyBuddyError::Store("Missing or insufficient permissions.".to_string()),
    );

    // Assert
    let state = progress.state();
    assert_eq!(state.goals.items.len(), 1);
    assert_eq!(state.goals.error.as_deref(), Some("Missing or insufficient permissions."));
    assert_eq!(harness.store.listener_count(), 0);
}

#[tokio::test]
async fn test_disposed_screen_ignores_late_results() {
    let harness = signed_in().await;
    let progress = harness.app.progress().expect("signed in");
    progress.mount();
    progress.dispose();

    progress.set_new_goal_text("Written after dispose");
    let created = progress.add_goal().await.expect("write still succeeds");

    assert!(created.is_some());
    let state = progress.state();
    assert!(state.goals.items.is_empty());
    assert!(state.banner.is_none());
    assert_eq!(state.new_goal_text, "Written after dispose");
}

#[tokio::test]
async fn test_failed_actions_show_error_banner_until_disposed() {
    // Arrange
    let harness = signed_in().await;
    let notes = harness.app.notes().expect("signed in");
    let schedule = harness.app.schedule().expect("signed in");
    harness.store.set_offline(true);

    // Act
    let note_outcome = notes.delete_note("n1").await;
    let session_outcome = schedule.delete_session("s1").await;
    schedule.dispose();
    harness.store.set_offline(false);
    schedule.delete_session("s2").await.expect("delete succeeds once online");

    // Assert
    assert!(note_outcome.is_err());
    assert!(session_outcome.is_err());
    let banner = notes.state().banner.expect("error banner shown");
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.message, "Failed to get document because the client is offline.");
    let banner = schedule.state().banner.expect("error banner kept after dispose");
    assert_eq!(banner.kind, BannerKind::Error);
}
