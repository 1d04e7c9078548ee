//! # Domain Module
//!
//! Contains all business logic for the attendance register.
//!
//! Services here know nothing about HTTP. Each one takes the acting
//! [`Principal`] explicitly and applies ownership before any read or write,
//! so another teacher's data surfaces as not-found or an empty list.
//!
//! ## Module Organization
//!
//! - **auth_service**: teacher accounts, password hashing and sessions
//! - **calendar_service**: the calendar registry of school and non-school days
//! - **klass_service** / **student_service**: the roster
//! - **attendance_service**: the attendance ledger and its bulk writer
//! - **report_service**: weekly and termly reports
//!
//! ## Business Rules
//!
//! - A date referenced for the first time is a school day unless it falls on a weekend
//! - Attendance can only be written for school days; a non-school day rejects a whole batch
//! - One attendance record per student per date; later writes replace the status

pub mod attendance_service;
pub mod auth_service;
pub mod calendar_service;
pub mod commands;
pub mod error;
pub mod klass_service;
pub mod models;
pub mod report_service;
pub mod student_service;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use attendance_service::AttendanceService;
pub use auth_service::AuthService;
pub use calendar_service::CalendarService;
pub use error::{DomainError, DomainResult};
pub use klass_service::KlassService;
pub use models::user::Principal;
pub use report_service::{ReportService, TermWindow};
pub use student_service::StudentService;
