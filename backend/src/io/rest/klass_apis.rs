//! # REST API for Classes
//!
//! CRUD over the classes owned by the logged-in teacher.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreateKlassRequest, Klass, UpdateKlassRequest};
use tracing::{error, info};

use super::extract::{ApiJson, ApiPath};
use super::mappers::klass_mapper::KlassMapper;
use crate::domain::Principal;
use crate::AppState;

/// Create a router for class APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list_klasses).post(create_klass))
        .route(
            "/classes/:id",
            get(get_klass).put(update_klass).delete(delete_klass),
        )
}

async fn list_klasses(State(state): State<AppState>, principal: Principal) -> impl IntoResponse {
    info!("GET /api/classes");

    match state.klass_service.list_klasses(&principal).await {
        Ok(klasses) => {
            let body: Vec<Klass> = klasses.into_iter().map(KlassMapper::to_dto).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to list classes: {}", e);
            e.into_response()
        }
    }
}

async fn create_klass(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<CreateKlassRequest>,
) -> impl IntoResponse {
    info!("POST /api/classes - request: {:?}", request);

    match state
        .klass_service
        .create_klass(&principal, KlassMapper::to_create_command(request))
        .await
    {
        Ok(klass) => (StatusCode::CREATED, Json(KlassMapper::to_dto(klass))).into_response(),
        Err(e) => {
            error!("Failed to create class: {}", e);
            e.into_response()
        }
    }
}

async fn get_klass(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("GET /api/classes/{}", id);

    match state.klass_service.get_klass(&principal, id).await {
        Ok(klass) => (StatusCode::OK, Json(KlassMapper::to_dto(klass))).into_response(),
        Err(e) => {
            error!("Failed to get class {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn update_klass(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateKlassRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{} - request: {:?}", id, request);

    match state
        .klass_service
        .update_klass(&principal, id, KlassMapper::to_update_command(request))
        .await
    {
        Ok(klass) => (StatusCode::OK, Json(KlassMapper::to_dto(klass))).into_response(),
        Err(e) => {
            error!("Failed to update class {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn delete_klass(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("DELETE /api/classes/{}", id);

    match state.klass_service.delete_klass(&principal, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete class {}: {}", id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::TestApp;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_class_lifecycle() {
        let app = TestApp::new().await;
        let key = app.login_as("alice").await;

        let (status, created) = app
            .post("/api/classes", &key, json!({"name": "Primary 3", "section": "B"}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["teacher_name"], "alice");
        assert_eq!(created["students"], json!([]));
        let id = created["id"].as_i64().unwrap();

        let (status, list) = app.get("/api/classes", &key).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, updated) = app
            .send(
                Method::PUT,
                &format!("/api/classes/{}", id),
                Some(&key),
                Some(json!({"section": "C"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["section"], "C");
        assert_eq!(updated["name"], "Primary 3");

        let (status, _) = app
            .send(Method::DELETE, &format!("/api/classes/{}", id), Some(&key), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app.get(&format!("/api/classes/{}", id), &key).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Class not found");
    }

    #[tokio::test]
    async fn test_other_teachers_class_is_hidden() {
        let app = TestApp::new().await;
        let alice = app.login_as("alice").await;
        let bob = app.login_as("bob").await;

        let (_, created) = app
            .post("/api/classes", &alice, json!({"name": "Primary 3", "section": "B"}))
            .await;
        let id = created["id"].as_i64().unwrap();

        let (status, list) = app.get("/api/classes", &bob).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));

        let (status, _) = app.get(&format!("/api/classes/{}", id), &bob).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_class_is_bad_request() {
        let app = TestApp::new().await;
        let key = app.login_as("alice").await;

        let (status, body) = app.post("/api/classes", &key, json!({"name": "  ", "section": "B"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Class name"));
    }
}
