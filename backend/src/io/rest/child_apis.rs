//! # REST API for Child Management
//!
//! Endpoints for creating and listing children.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::AppState;
use shared::CreateChildRequest;

/// Create a router for child related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_children).post(create_child))
}

/// List all children
pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.child_service.list_children().await {
        Ok(children) => (StatusCode::OK, Json(children)).into_response(),
        Err(e) => {
            error!("Failed to list children: {}", e);
            e.into_response()
        }
    }
}

/// Create a new child
pub async fn create_child(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - request: {:?}", request);

    match state.child_service.create_child(request).await {
        Ok(child) => (StatusCode::CREATED, Json(child)).into_response(),
        Err(e) => {
            error!("Failed to create child: {}", e);
            e.into_response()
        }
    }
}
