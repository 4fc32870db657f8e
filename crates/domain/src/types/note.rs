//! Study notes and note search

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{FormField, Result, StudyBuddyError};

/// Filter value matching every note.
pub const ALL_NOTES: &str = "All";

/// A note stored at `users/{uid}/notes/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct StudyNote {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<NaiveDate>,
}

impl StudyNote {
    /// Case-insensitive match of `query` against title, content and tags.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }

    /// Whether the note belongs to the `filter` subject or carries it as a tag.
    #[must_use]
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter == ALL_NOTES || self.subject == filter || self.tags.iter().any(|tag| tag == filter)
    }
}

/// Notes matching both the search text and the subject/tag filter.
#[must_use]
pub fn filter_notes(notes: &[StudyNote], query: &str, filter: &str) -> Vec<StudyNote> {
    notes
        .iter()
        .filter(|note| note.matches_search(query) && note.matches_filter(filter))
        .cloned()
        .collect()
}

/// Filter chips: "All" followed by every distinct subject, in first-seen order.
#[must_use]
pub fn note_filters(notes: &[StudyNote]) -> Vec<String> {
    let mut filters = vec![ALL_NOTES.to_string()];
    for note in notes {
        if !note.subject.is_empty() && !filters.contains(&note.subject) {
            filters.push(note.subject.clone());
        }
    }
    filters
}

/// Field values of the add-note form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub subject: String,
    pub topic: String,
    /// Comma separated
    pub tags: String,
    /// Comma separated
    pub links: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl NewNote {
    /// Validate the form and build the note to store.
    ///
    /// # Errors
    /// Returns a validation error when the title or content is blank.
    pub fn into_note(self, today: NaiveDate) -> Result<StudyNote> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(FormField::Title);
        }
        if self.content.trim().is_empty() {
            missing.push(FormField::Content);
        }
        if !missing.is_empty() {
            return Err(StudyBuddyError::validation("Please fill in all fields.", missing));
        }

        Ok(StudyNote {
            id: String::new(),
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            subject: self.subject.trim().to_string(),
            topic: self.topic.trim().to_string(),
            tags: split_list(&self.tags),
            links: split_list(&self.links),
            created_date: Some(today),
            last_modified: Some(today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, subject: &str, tags: &[&str]) -> StudyNote {
        StudyNote {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("Notes about {title}"),
            subject: subject.to_string(),
            topic: String::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            links: Vec::new(),
            created_date: None,
            last_modified: None,
        }
    }

    fn sample() -> Vec<StudyNote> {
        vec![
            note("1", "Photosynthesis", "Biology", &["plants", "exam"]),
            note("2", "Derivatives", "Maths", &["calculus"]),
            note("3", "Cell division", "Biology", &["Mitosis"]),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_content_and_tags() {
        let notes = sample();
        let ids = |q: &str| -> Vec<String> {
            filter_notes(&notes, q, ALL_NOTES).into_iter().map(|n| n.id).collect()
        };
        assert_eq!(ids("PHOTO"), ["1"]);
        assert_eq!(ids("about derivatives"), ["2"]);
        assert_eq!(ids("mitosis"), ["3"]);
        assert_eq!(ids("  "), ["1", "2", "3"]);
    }

    #[test]
    fn filter_matches_subject_or_tag() {
        let notes = sample();
        let by_subject: Vec<_> = filter_notes(&notes, "", "Biology").into_iter().map(|n| n.id).collect();
        assert_eq!(by_subject, ["1", "3"]);
        let by_tag: Vec<_> = filter_notes(&notes, "", "exam").into_iter().map(|n| n.id).collect();
        assert_eq!(by_tag, ["1"]);
    }

    #[test]
    fn filter_chips_list_distinct_subjects() {
        assert_eq!(note_filters(&sample()), ["All", "Biology", "Maths"]);
    }

    #[test]
    fn new_note_splits_tags_and_requires_title_and_content() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let err = NewNote::default().into_note(today).unwrap_err();
        assert_eq!(err.fields(), &[FormField::Title, FormField::Content]);

        let note = NewNote {
            title: "Kinematics".to_string(),
            content: "v = u + at".to_string(),
            subject: "Physics".to_string(),
            tags: "motion, , equations".to_string(),
            ..NewNote::default()
        }
        .into_note(today)
        .expect("note should be valid");
        assert_eq!(note.tags, ["motion", "equations"]);
        assert_eq!(note.created_date, Some(today));
    }
}
