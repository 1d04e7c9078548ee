//! Request extractors whose rejections render like any other domain error.
//!
//! axum's own `Json`, `Query` and `Path` reject with 422 or a plain-text 400.
//! These wrappers turn the rejection into [`DomainError::Validation`], so a
//! malformed request gets the same `{"error": ...}` body as a bad date.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::domain::DomainError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(DomainError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DomainError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        DomainError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for DomainError {
    fn from(rejection: QueryRejection) -> Self {
        DomainError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for DomainError {
    fn from(rejection: PathRejection) -> Self {
        DomainError::Validation(rejection.body_text())
    }
}
