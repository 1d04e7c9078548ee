//! Request extractors for the session key and the acting teacher.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::{DomainError, Principal};
use crate::AppState;

pub const SESSION_COOKIE: &str = "sessionid";

/// The raw session key sent with the request
#[derive(Debug, Clone, PartialEq)]
pub struct SessionKey(pub String);

/// Session key from the `sessionid` cookie, else from `Authorization: Bearer`
pub fn session_key_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .filter(|key| !key.is_empty())
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionKey {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_key_from_headers(&parts.headers)
            .map(SessionKey)
            .ok_or(DomainError::Authentication)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let SessionKey(key) = SessionKey::from_request_parts(parts, state).await?;
        state.auth_service.authenticate(&key).await
    }
}
