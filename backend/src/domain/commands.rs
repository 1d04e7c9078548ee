//! Domain-level command and query types.
//!
//! Services take these instead of the public DTOs from the `shared` crate;
//! the REST layer does the mapping. Raw date strings are kept as text here
//! so that parsing, and its validation error, happens inside the domain.

pub mod auth {
    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub username: String,
        pub password: String,
    }
}

pub mod klass {
    #[derive(Debug, Clone)]
    pub struct CreateKlassCommand {
        pub name: String,
        pub section: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateKlassCommand {
        pub name: Option<String>,
        pub section: Option<String>,
    }
}

pub mod student {
    use shared::Gender;

    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub klass_id: i64,
        pub first_name: String,
        pub last_name: String,
        pub gender: Gender,
        pub date_of_birth: String,
        pub parent_name: String,
        pub parent_phone: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub klass_id: Option<i64>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub gender: Option<Gender>,
        pub date_of_birth: Option<String>,
        pub parent_name: Option<String>,
        pub parent_phone: Option<String>,
    }
}

pub mod attendance {
    /// One requested (student, status) pair. A missing status means absent;
    /// `student_id` is `None` when the request did not carry a usable id.
    #[derive(Debug, Clone)]
    pub struct AttendanceLine {
        pub student_id: Option<i64>,
        pub status: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct BulkAttendanceCommand {
        pub class_id: i64,
        pub date: String,
        pub lines: Vec<AttendanceLine>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct AttendanceListQuery {
        pub class_id: Option<i64>,
        pub date: Option<String>,
    }
}

pub mod calendar {
    #[derive(Debug, Clone)]
    pub struct SetDayCommand {
        pub date: String,
        pub is_school_day: bool,
        pub notes: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct CalendarRangeQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }
}

pub mod reports {
    /// Missing year/week fall back to the current ISO week
    #[derive(Debug, Clone)]
    pub struct WeeklyReportQuery {
        pub class_id: i64,
        pub year: Option<i32>,
        pub week: Option<u32>,
    }

    /// Missing dates fall back to the configured term window
    #[derive(Debug, Clone)]
    pub struct TermlyReportQuery {
        pub class_id: i64,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }
}
