// HTTP request handlers
use crate::domain::feed::FeedOutcomes;
use crate::domain::place::PlaceSearch;
use crate::domain::snapshot::{EnvironmentSnapshot, Location};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MIN_PLACE_QUERY_LEN: usize = 2;

#[derive(Deserialize)]
pub struct CoordinateQuery {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinateQuery {
    fn into_location(self) -> Result<Location, ApiError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ApiError::InvalidInput(format!(
                "lat must be a number between -90 and 90, got {}",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(ApiError::InvalidInput(format!(
                "lon must be a number between -180 and 180, got {}",
                self.lon
            )));
        }
        Ok(Location {
            lat: self.lat,
            lon: self.lon,
        })
    }
}

#[derive(Deserialize)]
pub struct PlaceQuery {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub service: String,
    pub utc: String,
}

/// Health probe
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ok: true,
        service: state.service_name.clone(),
        utc: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Geocoding search by place name
pub async fn places(
    query: Result<Query<PlaceQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlaceSearch>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    if query.q.chars().count() < MIN_PLACE_QUERY_LEN {
        return Err(ApiError::InvalidInput(format!(
            "q must be at least {MIN_PLACE_QUERY_LEN} characters"
        )));
    }

    Ok(Json(state.places_service.search(&query.q).await))
}

/// Raw upstream envelopes for debugging
pub async fn raw_openmeteo(
    query: Result<Query<CoordinateQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeedOutcomes>, ApiError> {
    let location = coordinates(query)?;
    Ok(Json(state.environment_service.raw(location).await))
}

/// Aggregated snapshot. Upstream failures are reported in `sources`, never
/// as an error status.
pub async fn environment(
    query: Result<Query<CoordinateQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<EnvironmentSnapshot>, ApiError> {
    let location = coordinates(query)?;
    Ok(Json(state.environment_service.snapshot(location).await))
}

fn coordinates(query: Result<Query<CoordinateQuery>, QueryRejection>) -> Result<Location, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    query.into_location()
}
