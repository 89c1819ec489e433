//! # REST API for Day Records
//!
//! Read endpoints always answer 200, falling back to defaults; write
//! endpoints answer 500 with a generic body when storage fails.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{DayRecord, ErrorResponse, SuccessResponse};
use tracing::{error, info};

use crate::AppState;

/// GET /api/day/:date
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/day/{}", date);

    let record = state.day_record_service.get_day(&date).await;
    (StatusCode::OK, Json(record))
}

/// POST /api/day/:date
pub async fn save_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(record): Json<DayRecord>,
) -> impl IntoResponse {
    info!("POST /api/day/{}", date);

    match state.day_record_service.save_day(&date, record).await {
        Ok(_) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => {
            error!("Error saving day data: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save data")),
            )
                .into_response()
        }
    }
}

/// GET /api/days
pub async fn list_days(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/days");

    let days = state.day_record_service.list_days().await;
    info!("Listing {} days", days.len());
    (StatusCode::OK, Json(days))
}

/// DELETE /api/day/:date
pub async fn delete_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/day/{}", date);

    match state.day_record_service.delete_day(&date).await {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => {
            error!("Error deleting day: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to delete data")),
            )
                .into_response()
        }
    }
}
