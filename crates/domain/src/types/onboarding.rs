//! First-run setup: pages, choices and the preferences they produce

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{FormField, Result, StudyBuddyError};

/// Choices on the personalize page.
pub const ACADEMIC_LEVELS: [&str; 4] = ["High School", "University", "Graduate School", "Other"];

/// Study method choices on the personalize page.
pub const STUDY_METHODS: [&str; 6] = [
    "Visual Learning",
    "Reading",
    "Practice Problems",
    "Group Study",
    "Flashcards",
    "Note-taking",
];

/// Subject choices on the personalize page.
pub const SUBJECTS: [&str; 8] = [
    "Mathematics",
    "Science",
    "History",
    "Literature",
    "Languages",
    "Computer Science",
    "Art",
    "Music",
];

/// Choices on the goals page.
pub const GOAL_PREFERENCES: [&str; 8] = [
    "Improve GPA",
    "Better Time Management",
    "Exam Preparation",
    "Assignment Completion",
    "Study Consistency",
    "Reduce Procrastination",
    "Skill Development",
    "Knowledge Retention",
];

/// Pages of the setup flow, in order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OnboardingPage {
    #[default]
    Welcome,
    Personalize,
    Goals,
}

impl OnboardingPage {
    /// Number of pages.
    pub const COUNT: usize = 3;

    /// Zero-based position in the flow.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Personalize => 1,
            Self::Goals => 2,
        }
    }

    /// Share of the flow reached, `(index + 1) / 3`.
    #[must_use]
    pub fn progress(self) -> f64 {
        match self {
            Self::Welcome => 1.0 / 3.0,
            Self::Personalize => 2.0 / 3.0,
            Self::Goals => 1.0,
        }
    }

    /// Following page; `None` on the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Welcome => Some(Self::Personalize),
            Self::Personalize => Some(Self::Goals),
            Self::Goals => None,
        }
    }

    /// Preceding page; `None` on the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Welcome => None,
            Self::Personalize => Some(Self::Welcome),
            Self::Goals => Some(Self::Personalize),
        }
    }

    /// Whether this page ends the flow.
    #[must_use]
    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    /// Caption of the forward button.
    #[must_use]
    pub fn action_label(self) -> &'static str {
        if self.is_last() {
            "Get Started"
        } else {
            "Next"
        }
    }
}

/// Choices collected by the setup flow, stored as `preferences` on the
/// user document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct StudyPreferences {
    pub academic_level: String,
    /// Selection order is kept.
    pub study_methods: Vec<String>,
    pub subjects: Vec<String>,
    pub goals: Vec<String>,
}

impl StudyPreferences {
    /// Whether the forward button is enabled on `page`.
    #[must_use]
    pub fn allows_leaving(&self, page: OnboardingPage) -> bool {
        match page {
            OnboardingPage::Welcome => true,
            OnboardingPage::Personalize => !self.academic_level.is_empty(),
            OnboardingPage::Goals => !self.goals.is_empty(),
        }
    }

    /// # Errors
    /// Returns a validation error flagging the choice `page` still needs.
    pub fn check_page(&self, page: OnboardingPage) -> Result<()> {
        if self.allows_leaving(page) {
            return Ok(());
        }
        Err(match page {
            OnboardingPage::Personalize => {
                StudyBuddyError::validation("Please select your academic level.", [FormField::AcademicLevel])
            }
            _ => StudyBuddyError::validation("Please choose at least one goal.", [FormField::GoalPreferences]),
        })
    }
}

/// Add `choice` to `selected`, or remove it when already present.
pub fn toggle_choice(selected: &mut Vec<String>, choice: &str) {
    if let Some(position) = selected.iter().position(|item| item == choice) {
        selected.remove(position);
    } else {
        selected.push(choice.to_string());
    }
}
