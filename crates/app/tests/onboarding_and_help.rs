//! First-run setup after sign-up, and the help & support screen.

mod support;

use studybuddy_app::{Route, Tab};
use studybuddy_domain::types::onboarding::{ACADEMIC_LEVELS, GOAL_PREFERENCES, STUDY_METHODS};
use studybuddy_domain::{FormField, OnboardingPage, UserProfile};
use support::{harness, sign_up};

#[tokio::test]
async fn test_setup_pages_gate_and_store_preferences() {
    // Arrange
    let harness = harness();
    let mut navigator = harness.app.navigator();
    navigator.to_sign_up();
    sign_up(&harness).await;
    harness.app.finish_sign_up(&mut navigator).await;
    assert_eq!(navigator.current(), Route::Onboarding);
    let screen = harness.app.onboarding().expect("signed in");

    // Act
    assert_eq!(screen.next().expect("welcome has no requirement"), OnboardingPage::Personalize);
    let missing_level = screen.next().expect_err("academic level required");
    screen.select_academic_level(ACADEMIC_LEVELS[1]);
    screen.toggle_study_method(STUDY_METHODS[4]);
    screen.next().expect("level chosen");
    let missing_goal = harness
        .app
        .complete_onboarding(&screen, &mut navigator)
        .await
        .expect_err("a goal is required");
    screen.toggle_goal(GOAL_PREFERENCES[2]);
    harness.app.complete_onboarding(&screen, &mut navigator).await.expect("setup saved");

    // Assert
    assert_eq!(missing_level.fields(), [FormField::AcademicLevel]);
    assert_eq!(missing_goal.fields(), [FormField::GoalPreferences]);
    assert_eq!(navigator.current(), Route::Main(Tab::Home));

    let state = screen.state();
    assert!(state.completed);
    assert!(!state.saving);
    assert!(state.invalid_fields.is_empty());

    let users = harness.store.documents("users");
    let profile: UserProfile = users[0].decode().expect("profile decodes");
    let preferences = profile.preferences.expect("preferences stored");
    assert_eq!(preferences.academic_level, "University");
    assert_eq!(preferences.study_methods, ["Flashcards"]);
    assert_eq!(preferences.goals, ["Exam Preparation"]);
    assert_eq!(profile.username.as_deref(), Some(support::USERNAME));
}

#[tokio::test]
async fn test_back_keeps_choices_and_progress_follows_the_page() {
    let harness = harness();
    sign_up(&harness).await;
    let screen = harness.app.onboarding().expect("signed in");

    screen.next().expect("welcome");
    screen.select_academic_level(ACADEMIC_LEVELS[0]);
    screen.next().expect("personalize");
    assert!((screen.state().progress() - 1.0).abs() < 1e-9);
    assert_eq!(screen.state().page.action_label(), "Get Started");

    screen.back();
    let state = screen.state();
    assert_eq!(state.page, OnboardingPage::Personalize);
    assert_eq!(state.preferences.academic_level, "High School");
    assert!((state.progress() - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_failed_setup_save_stays_on_setup() {
    // Arrange
    let harness = harness();
    let mut navigator = harness.app.navigator();
    navigator.to_sign_up();
    sign_up(&harness).await;
    harness.app.finish_sign_up(&mut navigator).await;
    let screen = harness.app.onboarding().expect("signed in");
    screen.next().expect("welcome");
    screen.select_academic_level(ACADEMIC_LEVELS[3]);
    screen.next().expect("personalize");
    screen.toggle_goal(GOAL_PREFERENCES[0]);
    harness.store.set_offline(true);

    // Act
    let err = harness
        .app
        .complete_onboarding(&screen, &mut navigator)
        .await
        .expect_err("store offline");

    // Assert
    assert!(err.is_remote());
    assert_eq!(navigator.current(), Route::Onboarding);
    let state = screen.state();
    assert!(!state.completed);
    assert!(!state.saving);
    assert!(state.banner.is_some_and(|banner| banner.is_error()));
}

#[tokio::test]
async fn test_help_is_available_signed_out() {
    let harness = harness();
    let help = harness.app.help();

    help.set_search("Password");
    let visible = help.state().visible_faqs();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].category, "Account");

    help.clear_search();
    help.set_category("Scheduling");
    let visible = help.state().visible_faqs();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].question, "How do I create a study schedule?");
    assert_eq!(help.state().support_email(), "support@studybuddy.com");
}
