//! # Attendance Writer
//!
//! Bulk upsert of one day's attendance for a class.
//!
//! The school-day check is global: a date that is not a school day rejects
//! the whole batch before anything is written. Student lookups are local:
//! a line naming a student outside the class is collected as an error and
//! the remaining lines are still written. Written lines are never rolled
//! back. Resubmitting a (student, date) pair overwrites its status.

use shared::AttendanceStatus;
use tracing::{info, warn};

use crate::domain::calendar_service::CalendarService;
use crate::domain::commands::attendance::{AttendanceLine, AttendanceListQuery, BulkAttendanceCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::attendance::{status_from_code, AttendanceRecord, BulkAttendanceResult};
use crate::domain::models::calendar::{is_weekend, parse_iso_date};
use crate::domain::models::user::Principal;
use crate::storage::{AttendanceRepository, DbConnection, KlassRepository, StudentRepository};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    klass_repository: KlassRepository,
    student_repository: StudentRepository,
    calendar_service: CalendarService,
}

impl AttendanceService {
    pub fn new(db: DbConnection, calendar_service: CalendarService) -> Self {
        Self {
            attendance_repository: AttendanceRepository::new(db.clone()),
            klass_repository: KlassRepository::new(db.clone()),
            student_repository: StudentRepository::new(db),
            calendar_service,
        }
    }

    async fn ensure_klass_owned(&self, principal: &Principal, klass_id: i64) -> DomainResult<()> {
        if self.klass_repository.get_owned(principal.user_id, klass_id).await?.is_none() {
            warn!("Class {} not found for teacher {}", klass_id, principal.username);
            return Err(DomainError::not_found("Class"));
        }
        Ok(())
    }

    /// Write a batch of statuses for one class on one date
    pub async fn bulk_write(
        &self,
        principal: &Principal,
        command: BulkAttendanceCommand,
    ) -> DomainResult<BulkAttendanceResult> {
        info!(
            "Bulk attendance for class {} on {} ({} lines)",
            command.class_id,
            command.date,
            command.lines.len()
        );

        let date = parse_iso_date(&command.date)?;
        self.ensure_klass_owned(principal, command.class_id).await?;

        let weekend = is_weekend(date);
        let day = self.calendar_service.get_or_create(date, !weekend).await?;
        if !day.is_school_day {
            let message = if weekend {
                format!(
                    "{} is a weekend and not marked as a school day. Cannot save attendance.",
                    date
                )
            } else {
                format!("{} is not a school day. Cannot save attendance.", date)
            };
            warn!("{}", message);
            return Err(DomainError::SchoolDay(message));
        }

        let mut result = BulkAttendanceResult::default();
        for (index, line) in command.lines.iter().enumerate() {
            match self.write_line(command.class_id, date, index, line).await {
                Ok(record) => result.records.push(record),
                Err(e @ DomainError::Storage(_)) => return Err(e),
                Err(e) => {
                    warn!("Skipping attendance line {}: {}", index, e);
                    result.errors.push(e);
                }
            }
        }

        info!(
            "Bulk attendance wrote {} records with {} errors",
            result.records.len(),
            result.errors.len()
        );
        Ok(result)
    }

    async fn write_line(
        &self,
        klass_id: i64,
        date: chrono::NaiveDate,
        index: usize,
        line: &AttendanceLine,
    ) -> DomainResult<AttendanceRecord> {
        let student_id = line.student_id.ok_or_else(|| {
            DomainError::validation(format!("attendance[{}]: student_id must be an integer.", index))
        })?;

        let status = match line.status.as_deref() {
            None => AttendanceStatus::Absent,
            Some(raw) => status_from_code(raw.trim()).ok_or_else(|| {
                DomainError::validation(format!(
                    "Invalid status '{}' for student {}. Use 'present' or 'absent'.",
                    raw, student_id
                ))
            })?,
        };

        let student = self
            .student_repository
            .find_in_klass(student_id, klass_id)
            .await?
            .ok_or(DomainError::StudentNotInClass(student_id))?;

        Ok(self
            .attendance_repository
            .upsert_record(student.id, date, status)
            .await?)
    }

    pub async fn list_records(
        &self,
        principal: &Principal,
        query: AttendanceListQuery,
    ) -> DomainResult<Vec<AttendanceRecord>> {
        let date = query.date.as_deref().map(parse_iso_date).transpose()?;
        Ok(self
            .attendance_repository
            .list_owned(principal.user_id, query.class_id, date)
            .await?)
    }

    pub async fn get_record(&self, principal: &Principal, record_id: i64) -> DomainResult<AttendanceRecord> {
        self.attendance_repository
            .get_owned(principal.user_id, record_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendance record"))
    }

    pub async fn delete_record(&self, principal: &Principal, record_id: i64) -> DomainResult<()> {
        info!("Deleting attendance record {}", record_id);

        if !self.attendance_repository.delete_owned(principal.user_id, record_id).await? {
            return Err(DomainError::not_found("Attendance record"));
        }
        Ok(())
    }

    /// Every record of one owned class
    pub async fn class_records(&self, principal: &Principal, klass_id: i64) -> DomainResult<Vec<AttendanceRecord>> {
        self.ensure_klass_owned(principal, klass_id).await?;
        Ok(self
            .attendance_repository
            .list_owned(principal.user_id, Some(klass_id), None)
            .await?)
    }
}
