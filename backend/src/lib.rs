//! # Attendance Backend
//!
//! Server side of the school attendance register.
//!
//! The crate follows a layered architecture:
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST handlers, mappers, principal extraction)
//!     ↓
//! Domain Layer (calendar, roster, attendance, reports, auth)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! This module wires the layers together: it builds the services into an
//! [`AppState`] and mounts every endpoint under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AttendanceService, AuthService, CalendarService, KlassService, ReportService, StudentService,
};
use crate::io::rest::{attendance_apis, auth_apis, calendar_apis, klass_apis, student_apis};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub calendar_service: CalendarService,
    pub klass_service: KlassService,
    pub student_service: StudentService,
    pub attendance_service: AttendanceService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(db: DbConnection, config: &AppConfig) -> Self {
        let calendar_service = CalendarService::new(db.clone());
        Self {
            auth_service: AuthService::new(db.clone(), config.session_ttl()),
            klass_service: KlassService::new(db.clone()),
            student_service: StudentService::new(db.clone()),
            attendance_service: AttendanceService::new(db.clone(), calendar_service.clone()),
            report_service: ReportService::new(db, calendar_service.clone(), config.term_window()),
            calendar_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let app_state = AppState::new(db, config);

    if let Some(teacher) = &config.bootstrap_teacher {
        app_state
            .auth_service
            .ensure_teacher(&teacher.username, &teacher.password)
            .await
            .with_context(|| format!("Failed to create bootstrap teacher {}", teacher.username))?;
    }

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", allowed_origin))?;

    // Credentials travel as a cookie, so the origin must be explicit
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(auth_apis::router())
        .merge(klass_apis::router())
        .merge(student_apis::router())
        .merge(attendance_apis::router())
        .merge(calendar_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapTeacher;
    use crate::domain::commands::auth::LoginCommand;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_initialize_creates_bootstrap_teacher_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_url: format!("sqlite:{}", dir.path().join("attendance.db").display()),
            bootstrap_teacher: Some(BootstrapTeacher {
                username: "head".to_string(),
                password: "secret".to_string(),
            }),
            ..AppConfig::default()
        };

        initialize_backend(&config).await.unwrap();
        // A restart finds the existing account
        let state = initialize_backend(&config).await.unwrap();

        let (user, _) = state
            .auth_service
            .login(LoginCommand {
                username: "head".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.username, "head");
    }

    #[tokio::test]
    async fn test_router_mounts_under_api() {
        let db = DbConnection::init_test().await.unwrap();
        let config = AppConfig::default();
        let app = create_router(AppState::new(db, &config), &config.allowed_origin).unwrap();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/classes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(Request::builder().uri("/classes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rejects_bad_origin() {
        let db = DbConnection::init_test().await.unwrap();
        let state = AppState::new(db, &AppConfig::default());
        assert!(create_router(state, "http://bad\norigin").is_err());
    }
}
