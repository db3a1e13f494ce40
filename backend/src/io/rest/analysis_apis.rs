//! # REST API for the Simulated Progress Analysis

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::{error, info};

use crate::AppState;
use shared::AnalysisRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze-simulated", post(analyze_progress_simulated))
}

/// Return a canned analysis for an existing child
pub async fn analyze_progress_simulated(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> impl IntoResponse {
    info!("POST /api/ai/analyze-simulated - child_id: {}", request.child_id);

    match state.analysis_service.analyze(&request.child_id).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => {
            error!("Failed to analyze progress: {}", e);
            e.into_response()
        }
    }
}
