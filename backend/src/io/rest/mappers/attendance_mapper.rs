use serde_json::Value;
use shared::{
    AttendanceRecord as SharedAttendanceRecord, BulkAttendancePartialResponse, BulkAttendanceRequest,
    ClassRecordsResponse,
};

use crate::domain::commands::attendance::{AttendanceLine, BulkAttendanceCommand};
use crate::domain::models::attendance::{AttendanceRecord as DomainAttendanceRecord, BulkAttendanceResult};

pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_dto(domain: DomainAttendanceRecord) -> SharedAttendanceRecord {
        SharedAttendanceRecord {
            id: domain.id,
            student: domain.student_id,
            student_name: domain.student_name,
            date: domain.date.format("%Y-%m-%d").to_string(),
            status: domain.status,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainAttendanceRecord>) -> Vec<SharedAttendanceRecord> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_bulk_command(dto: BulkAttendanceRequest) -> BulkAttendanceCommand {
        BulkAttendanceCommand {
            class_id: dto.class_id,
            date: dto.date,
            lines: dto
                .attendance
                .into_iter()
                .map(|entry| AttendanceLine {
                    student_id: student_id_from_json(&entry.student_id),
                    status: entry.status.map(|status| match status {
                        Value::String(s) => s,
                        other => other.to_string(),
                    }),
                })
                .collect(),
        }
    }

    pub fn to_partial_dto(domain: BulkAttendanceResult) -> BulkAttendancePartialResponse {
        BulkAttendancePartialResponse {
            errors: domain.errors.iter().map(|e| e.to_string()).collect(),
            created: Self::to_dto_list(domain.records),
        }
    }

    pub fn to_class_records_dto(class_id: i64, domain: Vec<DomainAttendanceRecord>) -> ClassRecordsResponse {
        ClassRecordsResponse {
            class_id,
            total_records: domain.len(),
            attendance_records: Self::to_dto_list(domain),
        }
    }
}

/// Integer ids, also sent as numeric strings by form-style clients
fn student_id_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
