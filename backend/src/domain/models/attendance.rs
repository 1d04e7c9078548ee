//! Domain model for a daily attendance record.
use chrono::NaiveDate;
use shared::AttendanceStatus;

use crate::domain::error::DomainError;

/// One (student, date) entry of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    /// "<last>, <first>"
    pub student_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Outcome of a bulk write: written records plus per-line failures
#[derive(Debug, Default)]
pub struct BulkAttendanceResult {
    pub records: Vec<AttendanceRecord>,
    pub errors: Vec<DomainError>,
}

impl BulkAttendanceResult {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn status_code(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "present",
        AttendanceStatus::Absent => "absent",
    }
}

pub fn status_from_code(code: &str) -> Option<AttendanceStatus> {
    match code {
        "present" => Some(AttendanceStatus::Present),
        "absent" => Some(AttendanceStatus::Absent),
        _ => None,
    }
}
