//! # REST API for Students
//!
//! CRUD over students in the logged-in teacher's classes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{CreateStudentRequest, Student, UpdateStudentRequest};
use tracing::{error, info};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::mappers::student_mapper::StudentMapper;
use crate::domain::Principal;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentListQuery {
    pub klass: Option<i64>,
}

/// Create a router for student APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

async fn list_students(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(query): ApiQuery<StudentListQuery>,
) -> impl IntoResponse {
    info!("GET /api/students - query: {:?}", query);

    match state.student_service.list_students(&principal, query.klass).await {
        Ok(students) => {
            let body: Vec<Student> = students.into_iter().map(StudentMapper::to_dto).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to list students: {}", e);
            e.into_response()
        }
    }
}

async fn create_student(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/students - request: {:?}", request);

    match state
        .student_service
        .create_student(&principal, StudentMapper::to_create_command(request))
        .await
    {
        Ok(student) => (StatusCode::CREATED, Json(StudentMapper::to_dto(student))).into_response(),
        Err(e) => {
            error!("Failed to create student: {}", e);
            e.into_response()
        }
    }
}

async fn get_student(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("GET /api/students/{}", id);

    match state.student_service.get_student(&principal, id).await {
        Ok(student) => (StatusCode::OK, Json(StudentMapper::to_dto(student))).into_response(),
        Err(e) => {
            error!("Failed to get student {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn update_student(
    State(state): State<AppState>,
    principal: Principal,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateStudentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/students/{} - request: {:?}", id, request);

    match state
        .student_service
        .update_student(&principal, id, StudentMapper::to_update_command(request))
        .await
    {
        Ok(student) => (StatusCode::OK, Json(StudentMapper::to_dto(student))).into_response(),
        Err(e) => {
            error!("Failed to update student {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn delete_student(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("DELETE /api/students/{}", id);

    match state.student_service.delete_student(&principal, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete student {}: {}", id, e);
            e.into_response()
        }
    }
}
