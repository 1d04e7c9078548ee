//! Router fixtures shared by the REST handler tests.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use crate::config::AppConfig;
use crate::domain::commands::auth::LoginCommand;
use crate::storage::DbConnection;
use crate::{create_router, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let config = AppConfig::default();
        let state = AppState::new(db, &config);
        let router = create_router(state.clone(), &config.allowed_origin).expect("Failed to build router");
        Self { router, state }
    }

    /// Register a teacher and return a live session key for them
    pub async fn login_as(&self, username: &str) -> String {
        self.state
            .auth_service
            .register_teacher(username, "password")
            .await
            .expect("Failed to register teacher");
        let (_, session) = self
            .state
            .auth_service
            .login(LoginCommand {
                username: username.to_string(),
                password: "password".to_string(),
            })
            .await
            .expect("Failed to log in");
        session.key
    }

    /// Send a request with an optional bearer session and JSON body.
    /// An empty body decodes as `Value::Null`, a non-JSON one as a string.
    pub async fn send(&self, method: Method, uri: &str, session: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = session {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, session: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(session), None).await
    }

    pub async fn post(&self, uri: &str, session: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(session), Some(body)).await
    }
}
