//! Month grid for the home screen calendar
//!
//! Weeks start on Monday. Cells before the first of the month and after its
//! last day are blank (`None`).

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month laid out as Monday-first week rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    /// First day of the month shown.
    pub first: NaiveDate,
    pub days_in_month: u32,
    /// Blank cells before day 1 (0 when the month starts on a Monday).
    pub leading_blanks: u32,
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    /// Grid for the month containing `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let days_in_month = days_in_month(first);
        let leading_blanks = first.weekday().num_days_from_monday();

        let cells = leading_blanks + days_in_month;
        let rows = cells.div_ceil(7);
        let weeks = (0..rows)
            .map(|row| {
                let mut week = [None; 7];
                for (col, cell) in (0u32..).zip(week.iter_mut()) {
                    let index = row * 7 + col;
                    if index >= leading_blanks && index < cells {
                        *cell = Some(index - leading_blanks + 1);
                    }
                }
                week
            })
            .collect();

        Self { first, days_in_month, leading_blanks, weeks }
    }

    /// "March 2024"
    #[must_use]
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// The month before.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self::for_date(self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first))
    }

    /// The month after.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::for_date(self.first.checked_add_months(Months::new(1)).unwrap_or(self.first))
    }

    /// Date of `day` in this month, if it exists.
    #[must_use]
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}
