// API errors surfaced to callers as client errors
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(%status, error = %self, "rejecting request");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
