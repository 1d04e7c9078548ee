//! # REST API for Authentication
//!
//! Session login and logout, plus the current-teacher lookup.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::{DetailResponse, LoginRequest, LoginResponse, UserInfo};
use tracing::{error, info};

use super::extract::ApiJson;
use super::principal::{SessionKey, SESSION_COOKIE};
use crate::domain::commands::auth::LoginCommand;
use crate::domain::Principal;
use crate::AppState;

/// Create a router for authentication APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

/// Verify credentials, open a session and hand its key back as a cookie
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - user: {}", request.username);

    let command = LoginCommand {
        username: request.username,
        password: request.password,
    };

    match state.auth_service.login(command).await {
        Ok((user, session)) => {
            let max_age = (session.expires_at - session.created_at).num_seconds();
            let cookie = Cookie::build((SESSION_COOKIE, session.key.clone()))
                .http_only(true)
                .path("/")
                .same_site(SameSite::Lax)
                .max_age(time::Duration::seconds(max_age));
            let body = LoginResponse {
                detail: "Login Successful".to_string(),
                user: UserInfo {
                    id: user.id,
                    username: user.username,
                },
                sessionid: session.key,
            };
            (StatusCode::OK, jar.add(cookie), Json(body)).into_response()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            e.into_response()
        }
    }
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    principal: Principal,
    SessionKey(key): SessionKey,
) -> impl IntoResponse {
    info!("POST /api/auth/logout - user: {}", principal.username);

    match state.auth_service.logout(&key).await {
        Ok(()) => {
            let body = DetailResponse {
                detail: "Logout successful.".to_string(),
            };
            // Only a cookie that came with the request gets a removal cookie
            let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
            (StatusCode::OK, jar, Json(body)).into_response()
        }
        Err(e) => {
            error!("Logout failed: {}", e);
            e.into_response()
        }
    }
}

async fn me(principal: Principal) -> impl IntoResponse {
    info!("GET /api/auth/me");

    Json(UserInfo {
        id: principal.user_id,
        username: principal.username,
    })
}
