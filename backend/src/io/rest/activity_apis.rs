//! # REST API for Logged Activities
//!
//! Mounted under `/api/children`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::AppState;
use shared::LogActivityRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/:child_id/activities", get(list_activities).post(log_activity))
}

/// List a child's activities in the order they were logged
pub async fn list_activities(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/activities", child_id);

    match state.activity_service.list_activities(&child_id).await {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(e) => {
            error!("Failed to list activities: {}", e);
            e.into_response()
        }
    }
}

/// Log an activity for a child
pub async fn log_activity(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<LogActivityRequest>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/activities - request: {:?}", child_id, request);

    match state.activity_service.log_activity(&child_id, request).await {
        Ok(activity) => (StatusCode::CREATED, Json(activity)).into_response(),
        Err(e) => {
            error!("Failed to log activity: {}", e);
            e.into_response()
        }
    }
}
