//! HTTP rendering of domain errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::error;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::SchoolDay(_) | DomainError::StudentNotInClass(_) => {
                StatusCode::BAD_REQUEST
            }
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Authentication => StatusCode::UNAUTHORIZED,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            DomainError::Storage(e) => {
                error!("Storage failure: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// 400 with a plain message, for request shapes the extractors cannot reject
pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
