use chrono::{Months, NaiveDate};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `[start, end]` calendar window.
///
/// Construction validates ordering, so a `DateRange` in hand is always
/// fetchable; a reversed range is rejected before any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// A bound was not a `YYYY-MM-DD` date.
    Unparseable(String),
    /// `start` is after `end`.
    Reversed { start: String, end: String },
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::Unparseable(input) => {
                write!(f, "Not a YYYY-MM-DD date: '{}'", input)
            }
            DateRangeError::Reversed { start, end } => {
                write!(f, "Start date {} is after end date {}", start, end)
            }
        }
    }
}

impl std::error::Error for DateRangeError {}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Reversed {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse and validate both bounds from user-entered text.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end)
    }

    /// The default window: the trailing year ending today.
    pub fn trailing_year(today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start_str(), self.end_str())
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| DateRangeError::Unparseable(input.trim().to_string()))
}
