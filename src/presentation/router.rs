// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{environment, places, raw_openmeteo, status};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/places", get(places))
        .route("/raw/openmeteo", get(raw_openmeteo))
        .route("/environment", get(environment))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
