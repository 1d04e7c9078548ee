//! Domain model for a school calendar entry.
use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub id: i64,
    pub date: NaiveDate,
    pub is_school_day: bool,
    pub notes: String,
}

/// Saturday and Sunday are weekends regardless of any calendar override
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse a `YYYY-MM-DD` date, reporting malformed input as a validation error
pub fn parse_iso_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        DomainError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
    })
}
