//! # IO Module
//!
//! The interface layer between HTTP clients and the domain services.
//!
//! It translates JSON requests into domain commands, resolves the acting
//! teacher from the session, and maps domain results and errors back to
//! HTTP responses. No business rules live here.

pub mod rest;
