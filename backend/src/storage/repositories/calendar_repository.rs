use anyhow::Result;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::calendar::CalendarDay;
use crate::storage::connection::DbConnection;

/// Repository for the school calendar (one row per date)
#[derive(Clone)]
pub struct CalendarRepository {
    db: DbConnection,
}

impl CalendarRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Return the entry for `date`, inserting it with `default_is_school_day` first if missing.
    ///
    /// The insert is `INSERT OR IGNORE`, so a concurrent writer for the same date
    /// wins over the default instead of failing on the unique key.
    pub async fn get_or_create(&self, date: NaiveDate, default_is_school_day: bool) -> Result<CalendarDay> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO school_calendar (date, is_school_day, notes)
            VALUES (?, ?, '')
            "#,
        )
        .bind(date)
        .bind(default_is_school_day)
        .execute(self.db.pool())
        .await?;

        let row = sqlx::query("SELECT id, date, is_school_day, notes FROM school_calendar WHERE date = ?")
            .bind(date)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row_to_day(&row))
    }

    /// Create or overwrite the entry for `date`
    pub async fn upsert_day(&self, date: NaiveDate, is_school_day: bool, notes: &str) -> Result<CalendarDay> {
        sqlx::query(
            r#"
            INSERT INTO school_calendar (date, is_school_day, notes)
            VALUES (?, ?, ?)
            ON CONFLICT(date) DO UPDATE SET
                is_school_day = excluded.is_school_day,
                notes = excluded.notes
            "#,
        )
        .bind(date)
        .bind(is_school_day)
        .bind(notes)
        .execute(self.db.pool())
        .await?;

        let row = sqlx::query("SELECT id, date, is_school_day, notes FROM school_calendar WHERE date = ?")
            .bind(date)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row_to_day(&row))
    }

    pub async fn get_day(&self, date: NaiveDate) -> Result<Option<CalendarDay>> {
        let row = sqlx::query("SELECT id, date, is_school_day, notes FROM school_calendar WHERE date = ?")
            .bind(date)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.as_ref().map(row_to_day))
    }

    /// List entries ordered by date, optionally bounded on either side (inclusive)
    pub async fn list_days(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Vec<CalendarDay>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, is_school_day, notes
            FROM school_calendar
            WHERE (? IS NULL OR date >= ?)
              AND (? IS NULL OR date <= ?)
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(start)
        .bind(end)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_day).collect())
    }

    /// Count entries in [start, end] with the given school-day flag
    pub async fn count_days(&self, start: NaiveDate, end: NaiveDate, is_school_day: bool) -> Result<u32> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n
            FROM school_calendar
            WHERE date >= ? AND date <= ? AND is_school_day = ?
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(is_school_day)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get::<i64, _>("n") as u32)
    }
}

fn row_to_day(row: &SqliteRow) -> CalendarDay {
    CalendarDay {
        id: row.get("id"),
        date: row.get("date"),
        is_school_day: row.get("is_school_day"),
        notes: row.get("notes"),
    }
}
