// Repository modules
pub mod attendance_repository;
pub mod calendar_repository;
pub mod klass_repository;
pub mod session_repository;
pub mod student_repository;
pub mod user_repository;

// Re-export repository types
pub use attendance_repository::AttendanceRepository;
pub use calendar_repository::CalendarRepository;
pub use klass_repository::KlassRepository;
pub use session_repository::SessionRepository;
pub use student_repository::StudentRepository;
pub use user_repository::UserRepository;
