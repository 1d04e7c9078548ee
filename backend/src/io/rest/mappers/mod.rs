pub mod attendance_mapper;
pub mod calendar_mapper;
pub mod klass_mapper;
pub mod report_mapper;
pub mod student_mapper;
