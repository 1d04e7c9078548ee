use serde::{Deserialize, Serialize};

/// Generic error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Plain acknowledgement body (login/logout)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub detail: String,
    pub user: UserInfo,
    /// Opaque session key; also set as the `sessionid` cookie
    pub sessionid: String,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    /// YYYY-MM-DD
    pub date_of_birth: String,
    pub parent_name: String,
    pub parent_phone: String,
    /// ID of the class this student belongs to
    pub klass: i64,
    /// "<class name> - <section>"
    pub klass_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Klass {
    pub id: i64,
    pub name: String,
    pub section: String,
    /// ID of the owning teacher
    pub teacher: i64,
    pub teacher_name: String,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKlassRequest {
    pub name: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateKlassRequest {
    pub name: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub klass: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub parent_name: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub klass: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    /// ID of the student this record belongs to
    pub student: i64,
    /// "<last>, <first>"
    pub student_name: String,
    pub date: String,
    pub status: AttendanceStatus,
}

/// One line of a bulk attendance submission.
///
/// Both fields are kept as raw JSON so that a malformed value only fails its
/// own line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    #[serde(default)]
    pub student_id: serde_json::Value,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendanceRequest {
    pub class_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
}

/// 207 body: the lines that failed next to the ones that were written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAttendancePartialResponse {
    pub errors: Vec<String>,
    pub created: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecordsResponse {
    pub class_id: i64,
    pub total_records: usize,
    pub attendance_records: Vec<AttendanceRecord>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStudentRow {
    pub student_id: i64,
    pub student_name: String,
    pub presents: u32,
    pub school_days: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub week: u32,
    pub year: i32,
    pub start_date: String,
    pub end_date: String,
    pub total_school_days: u32,
    pub report: Vec<WeeklyStudentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_school_days: u32,
    pub total_non_school_days: u32,
    pub total_days_in_period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermlyStudentRow {
    pub student_id: i64,
    pub student_name: String,
    pub gender: Gender,
    pub presents: u32,
    pub absences: i64,
    /// Percentage rendered with one decimal, e.g. "83.3%"
    pub attendance_rate: String,
    /// "Excellent", "Good" or "Needs Improvement"
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTotals {
    pub total_students: u32,
    pub total_possible_attendance: u32,
    pub total_actual_attendance: u32,
    /// Omitted when the class has no students or the term has no school days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_average: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermlyReport {
    pub term_period: String,
    pub class_name: String,
    pub attendance_summary: AttendanceSummary,
    pub students: Vec<TermlyStudentRow>,
    pub class_totals: ClassTotals,
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub id: i64,
    pub date: String,
    pub is_school_day: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDayRequest {
    pub date: Option<String>,
    pub is_school_day: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_uses_single_letter_codes() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"M\"");
        let parsed: Gender = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(parsed, Gender::Female);
    }

    #[test]
    fn test_bulk_entry_status_is_optional() {
        let entry: AttendanceEntry = serde_json::from_str(r#"{"student_id": 4}"#).unwrap();
        assert_eq!(entry.student_id, serde_json::json!(4));
        assert!(entry.status.is_none());
    }

    #[test]
    fn test_bulk_entry_accepts_malformed_lines() {
        let entry: AttendanceEntry = serde_json::from_str(r#"{"status": "present"}"#).unwrap();
        assert!(entry.student_id.is_null());

        let entry: AttendanceEntry = serde_json::from_str(r#"{"student_id": "x", "status": 3}"#).unwrap();
        assert_eq!(entry.student_id, serde_json::json!("x"));
        assert_eq!(entry.status, Some(serde_json::json!(3)));
    }

    #[test]
    fn test_class_average_omitted_when_absent() {
        let totals = ClassTotals {
            total_students: 0,
            total_possible_attendance: 0,
            total_actual_attendance: 0,
            class_average: None,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert!(json.get("class_average").is_none());
    }
}
