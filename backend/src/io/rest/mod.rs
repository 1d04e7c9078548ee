//! # REST API Interface Layer
//!
//! HTTP endpoints for the attendance register, all mounted under `/api`.
//!
//! ## Key Responsibilities
//!
//! - **Authentication**: every handler except login takes a [`Principal`],
//!   resolved from the `sessionid` cookie or a bearer token
//! - **Error Handling**: [`DomainError`] renders as `{"error": ...}` with a
//!   status code chosen by variant
//! - **Serialization**: DTOs from the `shared` crate, converted by the mappers
//!
//! [`Principal`]: crate::domain::Principal
//! [`DomainError`]: crate::domain::DomainError

pub mod attendance_apis;
pub mod auth_apis;
pub mod calendar_apis;
pub mod error;
pub mod extract;
pub mod klass_apis;
pub mod mappers;
pub mod principal;
pub mod student_apis;

#[cfg(test)]
mod test_support;
