//! Weekly study statistics for the analytics screen

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{Goal, Session};

/// Longest streak the streak search looks back over.
const MAX_STREAK_DAYS: u32 = 366;

/// Hours studied on one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub date: NaiveDate,
    /// "Mon", "Tue", ...
    pub label: String,
    pub hours: f64,
}

/// Totals of one Monday-to-Sunday week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Monday through Sunday of the week containing the reference date.
    pub days: Vec<DayHours>,
    pub total_hours: f64,
    pub daily_average: f64,
    pub goals_completed: usize,
    /// Days of this week with any study time.
    pub days_studied: usize,
    /// Consecutive days with study time, ending today (or yesterday when
    /// nothing is logged yet today).
    pub streak: u32,
}

/// Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Minutes studied on `date`. Summed as `f64` so stored durations of any
/// size cannot overflow.
fn minutes_on(sessions: &[Session], date: NaiveDate) -> f64 {
    sessions
        .iter()
        .filter(|session| session.date == Some(date))
        .filter_map(Session::minutes)
        .map(f64::from)
        .sum()
}

/// Consecutive study days ending today. A day without sessions today does
/// not break a streak that ran until yesterday.
#[must_use]
pub fn study_streak(sessions: &[Session], today: NaiveDate) -> u32 {
    let start = if minutes_on(sessions, today) > 0.0 { today } else { today - Duration::days(1) };
    (0..MAX_STREAK_DAYS)
        .take_while(|offset| minutes_on(sessions, start - Duration::days(i64::from(*offset))) > 0.0)
        .count()
        .try_into()
        .unwrap_or(MAX_STREAK_DAYS)
}

/// Study hours per day of the week containing `today`.
///
/// Sessions without a date or a numeric duration do not count.
#[must_use]
pub fn weekly_stats(sessions: &[Session], goals: &[Goal], today: NaiveDate) -> WeeklyStats {
    let monday = week_start(today);
    let days: Vec<DayHours> = (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let minutes = minutes_on(sessions, date);
            DayHours {
                date,
                label: date.format("%a").to_string(),
                hours: minutes / 60.0,
            }
        })
        .collect();

    let total_hours: f64 = days.iter().map(|day| day.hours).sum();
    WeeklyStats {
        daily_average: total_hours / 7.0,
        total_hours,
        goals_completed: goals.iter().filter(|goal| goal.completed).count(),
        days_studied: days.iter().filter(|day| day.hours > 0.0).count(),
        streak: study_streak(sessions, today),
        days,
    }
}

/// Motivational line for the bottom of the analytics screen.
#[must_use]
pub fn encouragement(stats: &WeeklyStats) -> &'static str {
    if stats.streak >= 7 {
        "Amazing! You're on a 7-day streak! Keep the momentum going!"
    } else if stats.daily_average >= 4.0 {
        "Great job! You're consistently meeting your daily goals!"
    } else if stats.goals_completed >= 3 {
        "Excellent progress! You're crushing your goals this week!"
    } else {
        "You're doing great! Every study session counts towards your success!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: &str, minutes: &str) -> Session {
        Session {
            id: String::new(),
            subject: "Maths".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            duration: minutes.to_string(),
        }
    }

    #[test]
    fn hours_are_bucketed_by_weekday() {
        // 2024-03-13 is a Wednesday
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).expect("valid date");
        let sessions = vec![
            session("2024-03-11", "90"),
            session("2024-03-11", "30"),
            session("2024-03-17", "60"),
            session("2024-03-18", "600"),
            session("2024-03-12", "n/a"),
        ];
        let mut done = Goal::from_text("Finish").expect("valid goal");
        done.completed = true;
        let goals = vec![done, Goal::from_text("Start").expect("valid goal")];

        let stats = weekly_stats(&sessions, &goals, today);
        assert_eq!(stats.days[0].label, "Mon");
        assert!((stats.days[0].hours - 2.0).abs() < 1e-9);
        assert!((stats.days[6].hours - 1.0).abs() < 1e-9);
        assert!(stats.days[1].hours.abs() < f64::EPSILON);
        assert!((stats.total_hours - 3.0).abs() < 1e-9);
        assert!((stats.daily_average - 3.0 / 7.0).abs() < 1e-9);
        assert_eq!(stats.goals_completed, 1);
        assert_eq!(stats.days_studied, 2);
        assert_eq!(stats.streak, 0);
        assert_eq!(encouragement(&stats), "You're doing great! Every study session counts towards your success!");
    }

    #[test]
    fn streak_counts_back_from_yesterday_when_today_is_empty() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).expect("valid date");
        let sessions = vec![
            session("2024-03-12", "30"),
            session("2024-03-11", "30"),
            session("2024-03-09", "30"),
        ];
        assert_eq!(study_streak(&sessions, today), 2);

        let mut with_today = sessions.clone();
        with_today.push(session("2024-03-13", "15"));
        assert_eq!(study_streak(&with_today, today), 3);
    }

    #[test]
    fn oversized_stored_durations_do_not_overflow() {
        // Hand-written documents can bypass the form's one-day cap
        let today = NaiveDate::from_ymd_opt(2024, 3, 11).expect("valid date");
        let sessions = vec![session("2024-03-11", "3000000000"), session("2024-03-11", "3000000000")];

        let stats = weekly_stats(&sessions, &[], today);
        assert!((stats.days[0].hours - 100_000_000.0).abs() < 1e-3);
        assert_eq!(stats.days_studied, 1);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn week_starts_on_monday() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 17).expect("valid date");
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 3, 11).expect("valid date"));
    }
}
