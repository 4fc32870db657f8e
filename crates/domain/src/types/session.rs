//! Study sessions and duration arithmetic

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::MAX_SESSION_MINUTES;
use crate::errors::{FormField, Result, StudyBuddyError};

/// A study session stored at `users/{uid}/sessions/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub subject: String,
    /// Undated sessions (possible in hand-written documents) sort last.
    #[serde(default, deserialize_with = "deserialize_session_date")]
    pub date: Option<NaiveDate>,
    /// "HH:MM"
    #[serde(default)]
    pub start_time: String,
    /// "HH:MM"
    #[serde(default)]
    pub end_time: String,
    /// Minutes, kept as entered; blank when unknown.
    #[serde(default)]
    pub duration: String,
}

impl Session {
    /// Duration in whole minutes, if the stored value is numeric.
    #[must_use]
    pub fn minutes(&self) -> Option<u32> {
        self.duration.trim().parse().ok()
    }
}

fn deserialize_session_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_form_date))
}

/// Parse a date typed or picked in a form.
///
/// Accepts ISO `YYYY-MM-DD` and the picker's `d/M/yyyy` rendering.
#[must_use]
pub fn parse_form_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
}

/// Parse an `HH:MM` time of day.
#[must_use]
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

/// Format a picked time the way sessions store it.
#[must_use]
pub fn format_time_of_day(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Minutes between `start` and `end`, as text.
///
/// Blank when either side is unparseable or the span is not positive.
#[must_use]
pub fn compute_duration(start: &str, end: &str) -> String {
    let (Some(start), Some(end)) = (parse_time_of_day(start), parse_time_of_day(end)) else {
        return String::new();
    };
    let minutes = (end - start).num_minutes();
    if minutes > 0 {
        minutes.to_string()
    } else {
        String::new()
    }
}

/// Field values of the add-session form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSession {
    pub subject: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
}

impl NewSession {
    /// Validate the form and build the session to store.
    ///
    /// # Errors
    /// Returns a validation error naming every blank field, or the first
    /// malformed date/time/duration. Durations are capped at one day.
    pub fn into_session(self) -> Result<Session> {
        let required = [
            (&self.subject, FormField::Subject),
            (&self.date, FormField::Date),
            (&self.start_time, FormField::StartTime),
            (&self.end_time, FormField::EndTime),
            (&self.duration, FormField::Duration),
        ];
        let missing: Vec<FormField> = required
            .iter()
            .filter(|(value, _)| value.trim().is_empty())
            .map(|(_, field)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(StudyBuddyError::validation("Please fill in all fields.", missing));
        }

        let date = parse_form_date(&self.date)
            .ok_or_else(|| StudyBuddyError::validation("Invalid date.", [FormField::Date]))?;
        if parse_time_of_day(&self.start_time).is_none() {
            return Err(StudyBuddyError::validation("Invalid start time.", [FormField::StartTime]));
        }
        if parse_time_of_day(&self.end_time).is_none() {
            return Err(StudyBuddyError::validation("Invalid end time.", [FormField::EndTime]));
        }
        match self.duration.trim().parse::<u32>() {
            Ok(minutes) if minutes <= MAX_SESSION_MINUTES => {}
            Ok(_) => {
                return Err(StudyBuddyError::validation(
                    "Duration cannot exceed one day.",
                    [FormField::Duration],
                ));
            }
            Err(_) => {
                return Err(StudyBuddyError::validation(
                    "Duration must be a number of minutes.",
                    [FormField::Duration],
                ));
            }
        }

        Ok(Session {
            id: String::new(),
            subject: self.subject.trim().to_string(),
            date: Some(date),
            start_time: self.start_time.trim().to_string(),
            end_time: self.end_time.trim().to_string(),
            duration: self.duration.trim().to_string(),
        })
    }
}

/// Sessions ordered by date, then start time. Undated sessions go last.
#[must_use]
pub fn sort_sessions(sessions: &[Session]) -> Vec<Session> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| {
        (a.date.is_none(), a.date, &a.start_time).cmp(&(b.date.is_none(), b.date, &b.start_time))
    });
    sorted
}

/// The first `limit` sessions in date order.
#[must_use]
pub fn upcoming_sessions(sessions: &[Session], limit: usize) -> Vec<Session> {
    let mut sorted = sort_sessions(sessions);
    sorted.truncate(limit);
    sorted
}
