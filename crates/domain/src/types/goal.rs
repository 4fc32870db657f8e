//! Goal types and the progress/completion rule
//!
//! A goal is a progress unit: a numeric target, the current value towards it
//! and a completion flag. Goals added from the progress screen only carry a
//! text; they are stored as single-step goals (target 1, no unit).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::errors::{FormField, Result, StudyBuddyError};
use crate::impl_domain_enum_conversions;

/// Goal horizon, used by the goal management filter tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    #[default]
    ShortTerm,
    LongTerm,
}

impl_domain_enum_conversions!(GoalKind {
    ShortTerm => "short_term",
    LongTerm => "long_term",
});

impl GoalKind {
    /// Caption of the filter tab.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-term",
            Self::LongTerm => "Long-term",
        }
    }
}

/// A user goal stored at `users/{uid}/goals/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Document key; never written into the document body.
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, alias = "title")]
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: GoalKind,
    #[serde(default = "single_step_target")]
    pub target_value: u32,
    #[serde(default)]
    pub current_value: u32,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub streak: u32,
}

fn single_step_target() -> u32 {
    1
}

impl Goal {
    /// Create a single-step goal from free text (progress screen quick add).
    ///
    /// # Errors
    /// Returns a validation error when the text is blank.
    pub fn from_text(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StudyBuddyError::validation("Goal cannot be empty.", [FormField::Text]));
        }

        Ok(Self {
            id: String::new(),
            text: text.to_string(),
            description: String::new(),
            kind: GoalKind::ShortTerm,
            target_value: single_step_target(),
            current_value: 0,
            unit: String::new(),
            target_date: None,
            completed: false,
            streak: 0,
        })
    }

    /// Create a goal with a numeric target.
    ///
    /// A zero target is rejected here rather than special-cased later, so
    /// goals created by this client never divide by zero.
    ///
    /// # Errors
    /// Returns a validation error for a blank text or unit, or a zero target.
    pub fn with_target(text: &str, target_value: u32, unit: &str) -> Result<Self> {
        let mut goal = Self::from_text(text)?;

        let unit = unit.trim();
        if unit.is_empty() {
            return Err(StudyBuddyError::validation("Unit cannot be empty.", [FormField::Unit]));
        }
        if target_value == 0 {
            return Err(StudyBuddyError::validation(
                "Target must be greater than zero.",
                [FormField::TargetValue],
            ));
        }

        goal.target_value = target_value;
        goal.unit = unit.to_string();
        Ok(goal)
    }

    /// Fraction of the goal achieved, in `[0, 1]`.
    ///
    /// A completed goal always reports 1.0 whatever its stored values. A
    /// stored target of zero (only possible for documents written by another
    /// client) reports 1.0 as well, matching the `current >= target` rule.
    #[must_use]
    pub fn fractional_progress(&self) -> f64 {
        if self.completed || self.target_value == 0 {
            return 1.0;
        }
        (f64::from(self.current_value) / f64::from(self.target_value)).clamp(0.0, 1.0)
    }

    /// Whole-number completion percentage for the details view.
    #[must_use]
    pub fn completion_percent(&self) -> u32 {
        // fractional_progress is clamped to [0, 1]
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.fractional_progress() * 100.0).floor() as u32;
        percent
    }

    /// Whether the stored values alone reach the target.
    #[must_use]
    pub fn reaches_target(&self) -> bool {
        self.current_value >= self.target_value
    }

    /// Flip the completion flag. Stored values are left untouched.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Add `step` to the current value and re-derive completion.
    pub fn increment(&mut self, step: u32) {
        self.current_value = self.current_value.saturating_add(step);
        self.completed = self.reaches_target();
    }

    /// Mark the goal done, moving the current value up to the target.
    pub fn mark_complete(&mut self) {
        self.completed = true;
        self.current_value = self.target_value;
    }

    /// "current/target unit" label, e.g. `5/10 pages`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        if self.unit.is_empty() {
            format!("{}/{}", self.current_value, self.target_value)
        } else {
            format!("{}/{} {}", self.current_value, self.target_value, self.unit)
        }
    }
}

/// Parse the target field of the add-goal form.
///
/// # Errors
/// Returns a validation error for blank or non-numeric input.
pub fn parse_target_value(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Err(StudyBuddyError::validation(
            "Target cannot be empty.",
            [FormField::TargetValue],
        ));
    }
    input.parse::<u32>().map_err(|_| {
        StudyBuddyError::validation("Target must be a whole number.", [FormField::TargetValue])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_goal() -> Goal {
        Goal::with_target("Read 10 pages", 10, "pages").expect("valid goal")
    }

    #[test]
    fn completed_goal_reports_full_progress() {
        let mut goal = reading_goal();
        goal.current_value = 2;
        goal.completed = true;
        assert!((goal.fractional_progress() - 1.0).abs() < f64::EPSILON);
        // Display override only: the stored value is not rewritten
        assert_eq!(goal.current_value, 2);
    }

    #[test]
    fn progress_is_clamped() {
        let mut goal = reading_goal();
        goal.current_value = 25;
        assert!((goal.fractional_progress() - 1.0).abs() < f64::EPSILON);
        goal.current_value = 3;
        assert!((goal.fractional_progress() - 0.3).abs() < 1e-9);
        assert_eq!(goal.completion_percent(), 30);
    }

    #[test]
    fn increments_complete_the_goal_at_target() {
        let mut goal = reading_goal();
        for _ in 0..5 {
            goal.increment(1);
        }
        assert_eq!(goal.current_value, 5);
        assert!(!goal.completed);

        for _ in 0..5 {
            goal.increment(1);
        }
        assert_eq!(goal.current_value, 10);
        assert!(goal.completed);
    }

    #[test]
    fn toggle_is_a_pure_flag_flip() {
        let mut goal = reading_goal();
        goal.current_value = 4;
        goal.toggle_completed();
        assert!(goal.completed);
        assert_eq!(goal.current_value, 4);
        goal.toggle_completed();
        assert!(!goal.completed);
        assert_eq!(goal.current_value, 4);
    }

    #[test]
    fn mark_complete_moves_current_to_target() {
        let mut goal = reading_goal();
        goal.mark_complete();
        assert!(goal.completed);
        assert_eq!(goal.current_value, 10);
        assert_eq!(goal.progress_label(), "10/10 pages");
    }

    #[test]
    fn zero_target_is_rejected_at_creation() {
        let err = Goal::with_target("Nothing", 0, "pages").unwrap_err();
        assert_eq!(err.fields(), &[FormField::TargetValue]);
    }

    #[test]
    fn stored_zero_target_displays_complete() {
        let mut goal = reading_goal();
        goal.target_value = 0;
        assert!((goal.fractional_progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Goal::from_text("   ").unwrap_err();
        assert_eq!(err.fields(), &[FormField::Text]);
    }

    #[test]
    fn target_parsing_rejects_malformed_numbers() {
        assert_eq!(parse_target_value(" 12 "), Ok(12));
        assert!(parse_target_value("twelve").is_err());
        assert!(parse_target_value("").is_err());
        assert!(parse_target_value("-3").is_err());
    }

    #[test]
    fn text_only_documents_default_to_single_step() {
        let goal: Goal = serde_json::from_value(serde_json::json!({
            "text": "Revise chemistry",
            "completed": false
        }))
        .expect("legacy goal document should parse");
        assert_eq!(goal.target_value, 1);
        assert_eq!(goal.current_value, 0);
        assert!(goal.fractional_progress().abs() < f64::EPSILON);
    }

    #[test]
    fn id_is_not_written_to_the_document() {
        let mut goal = reading_goal();
        goal.id = "abc".to_string();
        let json = serde_json::to_value(&goal).expect("goal should serialize");
        assert!(json.get("id").is_none());
        assert_eq!(json["targetValue"], 10);
        assert_eq!(json["kind"], "short_term");
    }
}
