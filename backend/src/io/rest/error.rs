use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorResponse;

use crate::domain::DomainError;

impl DomainError {
    /// HTTP status and machine-readable code for this error.
    ///
    /// Id collisions are reported as 400 like other invalid input.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DomainError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            DomainError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            DomainError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Internal error");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
