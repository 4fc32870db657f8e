//! Study schedule and notes screens

mod support;

use chrono::NaiveDate;
use studybuddy_domain::{FormField, NewNote};
use support::signed_in;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_pickers_fill_the_duration_and_sessions_sort_by_date() {
    // Arrange
    let harness = signed_in().await;
    let screen = harness.app.schedule().expect("signed in");
    screen.mount();

    // Act
    for (subject, day, start, end) in [("Physics", 18, (14, 0), (15, 30)), ("Maths", 15, (9, 0), (10, 0))] {
        screen.set_subject(subject);
        screen.pick_date(date(2024, 3, day));
        screen.pick_start_time(start.0, start.1);
        screen.pick_end_time(end.0, end.1);
        if subject == "Physics" {
            assert_eq!(screen.state().form.duration, "90");
        }
        screen.add_session().await.expect("session added");
    }

    // Assert
    let state = screen.state();
    assert_eq!(state.form.subject, "");
    assert_eq!(state.sessions.items.len(), 2);
    assert_eq!(state.sessions.items[0].subject, "Maths");
    assert_eq!(state.sessions.items[0].start_time, "09:00");
    assert_eq!(state.sessions.items[1].minutes(), Some(90));
    assert_eq!(state.banner.as_ref().map(|b| b.message.clone()), Some("Study session added!".to_string()));
}

#[tokio::test]
async fn test_reversed_times_leave_duration_blank() {
    let harness = signed_in().await;
    let screen = harness.app.schedule().expect("signed in");
    screen.mount();

    screen.set_subject("Chemistry");
    screen.pick_date(date(2024, 3, 16));
    screen.pick_start_time(16, 0);
    screen.pick_end_time(15, 0);
    let err = screen.add_session().await.expect_err("no duration");

    assert!(err.is_validation());
    assert_eq!(screen.state().invalid_fields, vec![FormField::Duration]);
    assert!(screen.state().sessions.items.is_empty());

    screen.set_duration("45");
    screen.add_session().await.expect("manual duration accepted");
    assert_eq!(screen.state().sessions.items.len(), 1);
}

#[tokio::test]
async fn test_delete_session() {
    let harness = signed_in().await;
    let screen = harness.app.schedule().expect("signed in");
    screen.mount();
    screen.set_subject("Biology");
    screen.pick_date(date(2024, 3, 14));
    screen.pick_start_time(8, 0);
    screen.pick_end_time(9, 0);
    let id = screen.add_session().await.expect("session added");

    screen.delete_session(&id).await.expect("deleted");

    let state = screen.state();
    assert!(state.sessions.items.is_empty());
    assert_eq!(state.banner.as_ref().map(|b| b.message.clone()), Some("Study session removed.".to_string()));
}

#[tokio::test]
async fn test_notes_search_and_filter() {
    // Arrange
    let harness = signed_in().await;
    let screen = harness.app.notes().expect("signed in");
    screen.mount();
    let notes = [
        ("Cell structure", "Mitochondria are the powerhouse", "Biology", "exam, cells"),
        ("Derivatives", "Power rule and chain rule", "Maths", "calculus"),
        ("Photosynthesis", "Light reactions", "Biology", ""),
    ];
    for (title, content, subject, tags) in notes {
        let form = NewNote {
            title: title.to_string(),
            content: content.to_string(),
            subject: subject.to_string(),
            tags: tags.to_string(),
            ..NewNote::default()
        };
        screen.add_note(form).await.expect("note added");
    }

    // Act
    screen.set_search("POWER");
    let searched: Vec<String> = screen.state().visible_notes().into_iter().map(|n| n.title).collect();
    screen.set_search("");
    screen.set_filter("exam");
    let tagged: Vec<String> = screen.state().visible_notes().into_iter().map(|n| n.title).collect();

    // Assert
    assert_eq!(searched, vec!["Cell structure".to_string(), "Derivatives".to_string()]);
    assert_eq!(tagged, vec!["Cell structure".to_string()]);
    assert_eq!(
        screen.state().filters(),
        vec!["All".to_string(), "Biology".to_string(), "Maths".to_string()]
    );
    assert_eq!(screen.state().notes.items[0].tags, vec!["exam".to_string(), "cells".to_string()]);
}

#[tokio::test]
async fn test_note_needs_title_and_content() {
    let harness = signed_in().await;
    let screen = harness.app.notes().expect("signed in");
    screen.mount();

    let err = screen.add_note(NewNote::default()).await.expect_err("blank note");

    assert_eq!(err.user_message(), "Please fill in all fields.");
    assert_eq!(screen.state().invalid_fields, vec![FormField::Title, FormField::Content]);

    let id = screen
        .add_note(NewNote {
            title: "Essay outline".to_string(),
            content: "Intro, body, conclusion".to_string(),
            ..NewNote::default()
        })
        .await
        .expect("note added");
    screen.delete_note(&id).await.expect("deleted");
    assert_eq!(screen.state().banner.as_ref().map(|b| b.message.clone()), Some("Note deleted!".to_string()));
}
