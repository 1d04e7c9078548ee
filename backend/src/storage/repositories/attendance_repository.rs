use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use shared::AttendanceStatus;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::collections::HashMap;

use crate::domain::models::attendance::{status_code, status_from_code, AttendanceRecord};
use crate::storage::connection::DbConnection;

const SELECT_RECORD: &str = r#"
    SELECT a.id, a.student_id, s.last_name || ', ' || s.first_name AS student_name,
           a.date, a.status
    FROM attendance_records a
    JOIN students s ON s.id = a.student_id
    JOIN classes c ON c.id = s.klass_id
"#;

/// Repository for the attendance ledger, unique per (student, date)
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert or overwrite the status for (student, date). Last write wins.
    pub async fn upsert_record(
        &self,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord> {
        sqlx::query(
            r#"
            INSERT INTO attendance_records (student_id, date, status)
            VALUES (?, ?, ?)
            ON CONFLICT(student_id, date) DO UPDATE SET status = excluded.status
            "#,
        )
        .bind(student_id)
        .bind(date)
        .bind(status_code(status))
        .execute(self.db.pool())
        .await?;

        let sql = format!("{} WHERE a.student_id = ? AND a.date = ?", SELECT_RECORD);
        let row = sqlx::query(&sql)
            .bind(student_id)
            .bind(date)
            .fetch_one(self.db.pool())
            .await?;
        row_to_record(&row)
    }

    /// Fetch a record only if its student's class belongs to `teacher_id`
    pub async fn get_owned(&self, teacher_id: i64, record_id: i64) -> Result<Option<AttendanceRecord>> {
        let sql = format!("{} WHERE a.id = ? AND c.teacher_id = ?", SELECT_RECORD);
        let row = sqlx::query(&sql)
            .bind(record_id)
            .bind(teacher_id)
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(row_to_record).transpose()
    }

    /// Records visible to `teacher_id`, ordered by date then student
    pub async fn list_owned(
        &self,
        teacher_id: i64,
        klass_id: Option<i64>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let sql = format!(
            r#"{}
            WHERE c.teacher_id = ?
              AND (? IS NULL OR s.klass_id = ?)
              AND (? IS NULL OR a.date = ?)
            ORDER BY a.date ASC, a.student_id ASC"#,
            SELECT_RECORD
        );
        let rows = sqlx::query(&sql)
            .bind(teacher_id)
            .bind(klass_id)
            .bind(klass_id)
            .bind(date)
            .bind(date)
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    pub async fn delete_owned(&self, teacher_id: i64, record_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM attendance_records
            WHERE id = ?
              AND student_id IN (
                  SELECT s.id FROM students s
                  JOIN classes c ON c.id = s.klass_id
                  WHERE c.teacher_id = ?
              )
            "#,
        )
        .bind(record_id)
        .bind(teacher_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of `present` records per student of `klass_id` dated within [start, end].
    /// Students without any presents are absent from the map.
    pub async fn count_presents_by_student(
        &self,
        klass_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<i64, u32>> {
        let rows = sqlx::query(
            r#"
            SELECT a.student_id, COUNT(*) AS presents
            FROM attendance_records a
            JOIN students s ON s.id = a.student_id
            WHERE s.klass_id = ?
              AND a.status = 'present'
              AND a.date >= ? AND a.date <= ?
            GROUP BY a.student_id
            "#,
        )
        .bind(klass_id)
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|r| (r.get::<i64, _>("student_id"), r.get::<i64, _>("presents") as u32))
            .collect())
    }
}

fn row_to_record(row: &SqliteRow) -> Result<AttendanceRecord> {
    let code: String = row.get("status");
    let status = status_from_code(&code).ok_or_else(|| anyhow!("Unknown attendance status in database: {}", code))?;

    Ok(AttendanceRecord {
        id: row.get("id"),
        student_id: row.get("student_id"),
        student_name: row.get("student_name"),
        date: row.get("date"),
        status,
    })
}
