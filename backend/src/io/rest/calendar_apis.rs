//! # REST API for the School Calendar
//!
//! Read the calendar and mark days as school or non-school days. The
//! set-day operation is served under both `calender` and `schoolcalender`
//! for existing clients.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use shared::{CalendarDay, SetDayRequest};
use tracing::{error, info};

use super::error::bad_request;
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::mappers::calendar_mapper::CalendarMapper;
use crate::domain::commands::calendar::{CalendarRangeQuery, SetDayCommand};
use crate::domain::Principal;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Create a router for calendar APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calender", get(list_days))
        .route("/calender/set_day", post(set_day))
        .route("/calender/:date", get(get_day))
        .route("/schoolcalender/set_day", post(set_day))
}

async fn list_days(
    State(state): State<AppState>,
    _principal: Principal,
    ApiQuery(params): ApiQuery<CalendarListParams>,
) -> impl IntoResponse {
    info!("GET /api/calender - query: {:?}", params);

    let query = CalendarRangeQuery {
        start_date: params.start_date,
        end_date: params.end_date,
    };
    match state.calendar_service.list_days(query).await {
        Ok(days) => {
            let body: Vec<CalendarDay> = days.into_iter().map(CalendarMapper::to_dto).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to list calendar days: {}", e);
            e.into_response()
        }
    }
}

async fn get_day(State(state): State<AppState>, _principal: Principal, ApiPath(date): ApiPath<String>) -> impl IntoResponse {
    info!("GET /api/calender/{}", date);

    match state.calendar_service.get_day(&date).await {
        Ok(day) => (StatusCode::OK, Json(CalendarMapper::to_dto(day))).into_response(),
        Err(e) => {
            error!("Failed to get calendar day {}: {}", date, e);
            e.into_response()
        }
    }
}

async fn set_day(
    State(state): State<AppState>,
    principal: Principal,
    ApiJson(request): ApiJson<SetDayRequest>,
) -> impl IntoResponse {
    info!("POST set_day by {} - request: {:?}", principal.username, request);

    let (Some(date), Some(is_school_day)) = (request.date.filter(|d| !d.is_empty()), request.is_school_day) else {
        return bad_request("date and is_school_day are required.");
    };
    let command = SetDayCommand {
        date,
        is_school_day,
        notes: request.notes.unwrap_or_default(),
    };

    match state.calendar_service.set_day(command).await {
        Ok(day) => (StatusCode::OK, Json(CalendarMapper::to_dto(day))).into_response(),
        Err(e) => {
            error!("Failed to set calendar day: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::TestApp;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_day_on_both_paths() {
        let app = TestApp::new().await;
        let key = app.login_as("alice").await;

        let (status, day) = app
            .post(
                "/api/calender/set_day",
                &key,
                json!({"date": "2025-12-25", "is_school_day": false, "notes": "Christmas"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["notes"], "Christmas");
        assert_eq!(day["is_school_day"], false);

        let (status, day) = app
            .post(
                "/api/schoolcalender/set_day",
                &key,
                json!({"date": "2025-12-27", "is_school_day": false}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["notes"], "Weekend");

        let (status, day) = app.get("/api/calender/2025-12-25", &key).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["date"], "2025-12-25");

        let (_, days) = app.get("/api/calender?start_date=2025-12-26", &key).await;
        assert_eq!(days.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_day_requires_date_and_flag() {
        let app = TestApp::new().await;
        let key = app.login_as("alice").await;

        let (status, body) = app
            .post("/api/calender/set_day", &key, json!({"date": "2025-12-25"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "date and is_school_day are required.");

        let (status, _) = app
            .post("/api/calender/set_day", &key, json!({"date": "25-12-2025", "is_school_day": true}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_day_and_anonymous_access() {
        let app = TestApp::new().await;
        let key = app.login_as("alice").await;

        let (status, _) = app.get("/api/calender/2030-01-01", &key).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(axum::http::Method::GET, "/api/calender", None, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
