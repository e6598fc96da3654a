// Place domain model - a geocoding search hit
use super::feed::GeocodingResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub admin1: Option<String>,
}

impl From<GeocodingResult> for Place {
    fn from(result: GeocodingResult) -> Self {
        Self {
            name: result.name,
            country: result.country,
            lat: result.latitude,
            lon: result.longitude,
            admin1: result.admin1,
        }
    }
}

/// Response body of a place search; `error` carries the upstream failure, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSearch {
    pub query: String,
    pub results: Vec<Place>,
    pub error: Option<String>,
}
