// Places service - geocoding passthrough
use crate::application::upstream_client::{Feed, UpstreamClient};
use crate::domain::feed::{GeocodingPayload, decode};
use crate::domain::place::{Place, PlaceSearch};
use std::sync::Arc;
use std::time::Duration;

const RESULT_COUNT: u32 = 10;
const LANGUAGE: &str = "pt";

#[derive(Clone)]
pub struct PlacesService {
    client: Arc<dyn UpstreamClient>,
    timeout: Duration,
}

impl PlacesService {
    pub fn new(client: Arc<dyn UpstreamClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub async fn search(&self, query: &str) -> PlaceSearch {
        let params = vec![
            ("name", query.to_string()),
            ("count", RESULT_COUNT.to_string()),
            ("language", LANGUAGE.to_string()),
            ("format", "json".to_string()),
        ];

        let outcome = self.client.fetch(Feed::Geocoding, &params, self.timeout).await;
        if let Some(error) = outcome.error() {
            tracing::warn!(query, error, "geocoding search failed");
        }

        let payload: GeocodingPayload = decode(&outcome);
        PlaceSearch {
            query: query.to_string(),
            results: payload.results.into_iter().map(Place::from).collect(),
            error: outcome.error().map(str::to_string),
        }
    }
}
