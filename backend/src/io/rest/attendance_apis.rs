//! # REST API for Attendance
//!
//! The attendance ledger, its bulk writer, and the two reports.
//!
//! `bulk_create` answers 201 with every written record, or 207 with
//! `{errors, created}` when some lines were rejected. A date that is not a
//! school day fails the whole batch with 400.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shared::BulkAttendanceRequest;
use tracing::{error, info, warn};

use super::error::bad_request;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::mappers::{attendance_mapper::AttendanceMapper, report_mapper::ReportMapper};
use crate::domain::commands::attendance::AttendanceListQuery;
use crate::domain::commands::reports::{TermlyReportQuery, WeeklyReportQuery};
use crate::domain::Principal;
use crate::AppState;

const CLASS_ID_REQUIRED: &str = "class_id parameter required";

#[derive(Debug, Deserialize)]
pub struct AttendanceListParams {
    pub class_id: Option<i64>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyReportParams {
    pub class_id: Option<i64>,
    pub year: Option<i32>,
    pub week: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TermlyReportParams {
    pub class_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassRecordsParams {
    pub class_id: Option<i64>,
}

/// Create a router for attendance APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(list_records))
        .route("/attendance/bulk_create", post(bulk_create))
        .route("/attendance/weekly_report", get(weekly_report))
        .route("/attendance/termly_report", get(termly_report))
        .route("/attendance/class_records", get(class_records))
        .route("/attendance/:id", get(get_record).delete(delete_record))
}

async fn list_records(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(params): ApiQuery<AttendanceListParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance - query: {:?}", params);

    let query = AttendanceListQuery {
        class_id: params.class_id,
        date: params.date,
    };
    match state.attendance_service.list_records(&principal, query).await {
        Ok(records) => (StatusCode::OK, Json(AttendanceMapper::to_dto_list(records))).into_response(),
        Err(e) => {
            error!("Failed to list attendance: {}", e);
            e.into_response()
        }
    }
}

async fn get_record(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("GET /api/attendance/{}", id);

    match state.attendance_service.get_record(&principal, id).await {
        Ok(record) => (StatusCode::OK, Json(AttendanceMapper::to_dto(record))).into_response(),
        Err(e) => {
            error!("Failed to get attendance record {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn delete_record(State(state): State<AppState>, principal: Principal, ApiPath(id): ApiPath<i64>) -> impl IntoResponse {
    info!("DELETE /api/attendance/{}", id);

    match state.attendance_service.delete_record(&principal, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete attendance record {}: {}", id, e);
            e.into_response()
        }
    }
}

async fn bulk_create(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<BulkAttendanceRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/attendance/bulk_create - class: {}, date: {}, lines: {}",
        request.class_id,
        request.date,
        request.attendance.len()
    );

    match state
        .attendance_service
        .bulk_write(&principal, AttendanceMapper::to_bulk_command(request))
        .await
    {
        Ok(result) if result.is_partial() => {
            warn!("Bulk attendance partially applied: {} errors", result.errors.len());
            (StatusCode::MULTI_STATUS, Json(AttendanceMapper::to_partial_dto(result))).into_response()
        }
        Ok(result) => (StatusCode::CREATED, Json(AttendanceMapper::to_dto_list(result.records))).into_response(),
        Err(e) => {
            error!("Bulk attendance rejected: {}", e);
            e.into_response()
        }
    }
}

async fn weekly_report(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(params): ApiQuery<WeeklyReportParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance/weekly_report - query: {:?}", params);

    let Some(class_id) = params.class_id else {
        return bad_request(CLASS_ID_REQUIRED);
    };
    let query = WeeklyReportQuery {
        class_id,
        year: params.year,
        week: params.week,
    };
    match state.report_service.weekly_report(&principal, query).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_weekly_dto(report))).into_response(),
        Err(e) => {
            error!("Failed to build weekly report: {}", e);
            e.into_response()
        }
    }
}

async fn termly_report(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(params): ApiQuery<TermlyReportParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance/termly_report - query: {:?}", params);

    let Some(class_id) = params.class_id else {
        return bad_request(CLASS_ID_REQUIRED);
    };
    let query = TermlyReportQuery {
        class_id,
        start_date: params.start_date,
        end_date: params.end_date,
    };
    match state.report_service.termly_report(&principal, query).await {
        Ok(report) => (StatusCode::OK, Json(ReportMapper::to_termly_dto(report))).into_response(),
        Err(e) => {
            error!("Failed to build termly report: {}", e);
            e.into_response()
        }
    }
}

async fn class_records(
    State(state): State<AppState>,
    principal: Principal,
    ApiQuery(params): ApiQuery<ClassRecordsParams>,
) -> impl IntoResponse {
    info!("GET /api/attendance/class_records - query: {:?}", params);

    let Some(class_id) = params.class_id else {
        return bad_request(CLASS_ID_REQUIRED);
    };
    match state.attendance_service.class_records(&principal, class_id).await {
        Ok(records) => (
            StatusCode::OK,
            Json(AttendanceMapper::to_class_records_dto(class_id, records)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list records of class {}: {}", class_id, e);
            e.into_response()
        }
    }
}
