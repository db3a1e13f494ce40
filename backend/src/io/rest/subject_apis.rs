//! # REST API for Subjects
//!
//! The subject catalogue is seeded at startup and read-only.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_subjects))
}

/// List the predefined subjects
pub async fn list_subjects(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/subjects");

    match state.subject_service.list_subjects().await {
        Ok(subjects) => (StatusCode::OK, Json(subjects)).into_response(),
        Err(e) => {
            error!("Failed to list subjects: {}", e);
            e.into_response()
        }
    }
}
