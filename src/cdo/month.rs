//! Calendar month bounds for a query.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// First and last day of the month containing a reference date.
pub struct MonthWindow {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthWindow {
    pub fn containing(date: NaiveDate) -> Self {
        let first = date - TimeDelta::days(i64::from(date.day0()));
        let last = first + Months::new(1) - TimeDelta::days(1);

        MonthWindow { first, last }
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    /// Number of days in the month.
    pub fn days(&self) -> u32 {
        self.last.day()
    }

    pub fn start_param(&self) -> String {
        date_param(self.first)
    }

    pub fn end_param(&self) -> String {
        date_param(self.last)
    }
}

/// Formats as `YYYY-MM-DD`.
fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// -- Tests -------------------------------------------------------------------
