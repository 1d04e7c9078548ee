pub mod attendance;
pub mod calendar;
pub mod klass;
pub mod report;
pub mod student;
pub mod user;
