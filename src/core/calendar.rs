//! Calendar for draw days
//!
//! Every draw happens on its own day. The calendar hands out those days in
//! order and formats them the way reports and file names expect.

use chrono::{Days, Local, NaiveDate};

/// Day format used in reports: `DD-MM-YYYY`
pub const REPORT_DAY_FORMAT: &str = "%d-%m-%Y";

/// Timestamp format used in report file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a day as `DD-MM-YYYY`
pub fn format_day(day: NaiveDate) -> String {
    day.format(REPORT_DAY_FORMAT).to_string()
}

/// Local wall-clock timestamp for report file names
pub fn file_timestamp() -> String {
    Local::now().format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// Shift a day forward by `days`
///
/// # Panics
///
/// Panics if the result falls outside chrono's representable range.
pub fn advance_by(day: NaiveDate, days: u64) -> NaiveDate {
    day + Days::new(days)
}

/// Calendar tracks the current draw day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    day: NaiveDate,
}

impl Calendar {
    pub fn new(start: NaiveDate) -> Self {
        Self { day: start }
    }

    /// Start on `start`, or today when absent
    pub fn starting(start: Option<NaiveDate>) -> Self {
        Self::new(start.unwrap_or_else(today))
    }

    pub fn advance(&mut self) {
        self.day = advance_by(self.day, 1);
    }

    pub fn current_day(&self) -> NaiveDate {
        self.day
    }
}
