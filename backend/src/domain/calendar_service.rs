//! # Calendar Registry
//!
//! Decides which dates are school days. An entry is created the first time
//! a date is referenced, defaulting to "school day unless Saturday/Sunday",
//! and can be overridden at any time with [`CalendarService::set_day`].
//! Entries are never deleted.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::commands::calendar::{CalendarRangeQuery, SetDayCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::calendar::{is_weekend, parse_iso_date, CalendarDay};
use crate::storage::{CalendarRepository, DbConnection};

#[derive(Clone)]
pub struct CalendarService {
    calendar_repository: CalendarRepository,
}

impl CalendarService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            calendar_repository: CalendarRepository::new(db),
        }
    }

    /// Existing entry for `date`, or a new one with the given default
    pub async fn get_or_create(&self, date: NaiveDate, default_is_school_day: bool) -> DomainResult<CalendarDay> {
        Ok(self.calendar_repository.get_or_create(date, default_is_school_day).await?)
    }

    /// Existing entry for `date`, or a new one defaulting to "not a weekend"
    pub async fn resolve_day(&self, date: NaiveDate) -> DomainResult<CalendarDay> {
        self.get_or_create(date, !is_weekend(date)).await
    }

    /// Create or overwrite the entry for a date.
    /// A weekend marked as a non-school day with no notes is annotated "Weekend".
    pub async fn set_day(&self, command: SetDayCommand) -> DomainResult<CalendarDay> {
        info!(
            "Setting calendar day {} (school day: {})",
            command.date, command.is_school_day
        );

        let date = parse_iso_date(&command.date)?;
        let mut notes = command.notes.trim().to_string();
        if notes.chars().count() > 255 {
            return Err(DomainError::validation("Notes cannot exceed 255 characters"));
        }
        if is_weekend(date) && !command.is_school_day && notes.is_empty() {
            notes = "Weekend".to_string();
        }

        let day = self
            .calendar_repository
            .upsert_day(date, command.is_school_day, &notes)
            .await?;
        Ok(day)
    }

    pub async fn get_day(&self, raw_date: &str) -> DomainResult<CalendarDay> {
        let date = parse_iso_date(raw_date)?;
        match self.calendar_repository.get_day(date).await? {
            Some(day) => Ok(day),
            None => {
                warn!("No calendar entry for {}", date);
                Err(DomainError::not_found(format!("Calendar entry for {}", date)))
            }
        }
    }

    pub async fn list_days(&self, query: CalendarRangeQuery) -> DomainResult<Vec<CalendarDay>> {
        let start = query.start_date.as_deref().map(parse_iso_date).transpose()?;
        let end = query.end_date.as_deref().map(parse_iso_date).transpose()?;
        Ok(self.calendar_repository.list_days(start, end).await?)
    }

    /// Number of designated school days in [start, end]
    pub async fn count_school_days(&self, start: NaiveDate, end: NaiveDate) -> DomainResult<u32> {
        Ok(self.calendar_repository.count_days(start, end, true).await?)
    }

    /// Number of entries explicitly marked as non-school days in [start, end]
    pub async fn count_non_school_days(&self, start: NaiveDate, end: NaiveDate) -> DomainResult<u32> {
        Ok(self.calendar_repository.count_days(start, end, false).await?)
    }
}
