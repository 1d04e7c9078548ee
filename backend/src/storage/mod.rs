//! # Storage Module
//!
//! Handles all data persistence for the attendance register.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through SQLx, one repository per table
//! - **Schema**: created idempotently on connect; foreign keys cascade
//!   class → students → attendance records
//!
//! Repositories speak in domain models and return `anyhow::Result`. Anything
//! that is scoped to a teacher takes the teacher's id as an explicit argument
//! and filters in SQL, so a foreign row is indistinguishable from a missing one.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    AttendanceRepository,
    CalendarRepository,
    KlassRepository,
    SessionRepository,
    StudentRepository,
    UserRepository,
};
