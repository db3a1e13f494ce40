//! # REST API for Learning Goals
//!
//! Endpoints for listing and adding a child's learning goals. Mounted under
//! `/api/children`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::AppState;
use shared::CreateGoalRequest;

/// Create a router for goal related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/:child_id/goals", get(list_goals).post(create_goal))
}

/// List a child's learning goals
pub async fn list_goals(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/goals", child_id);

    match state.goal_service.list_goals(&child_id).await {
        Ok(goals) => (StatusCode::OK, Json(goals)).into_response(),
        Err(e) => {
            error!("Failed to list goals: {}", e);
            e.into_response()
        }
    }
}

/// Add a learning goal for a child
pub async fn create_goal(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<CreateGoalRequest>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/goals - request: {:?}", child_id, request);

    match state.goal_service.create_goal(&child_id, request).await {
        Ok(goal) => (StatusCode::CREATED, Json(goal)).into_response(),
        Err(e) => {
            error!("Failed to create goal: {}", e);
            e.into_response()
        }
    }
}
