// Fan-out coordinator - concurrent forecast/air/flood requests for one location
use crate::application::upstream_client::{Feed, QueryParams, UpstreamClient};
use crate::domain::feed::FeedOutcomes;
use crate::domain::outcome::Outcome;
use crate::domain::snapshot::Location;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const FORECAST_HOURLY: &str = "temperature_2m,precipitation,precipitation_probability,rain,weather_code";
const AIR_QUALITY_HOURLY: &str = "pm2_5,pm10,ozone,nitrogen_dioxide,european_aqi,us_aqi";
const FLOOD_DAILY: &str = "river_discharge";
const FLOOD_FORECAST_DAYS: u32 = 7;

/// Which shape of upstream request to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestProfile {
    /// Two forecast days in the location's own timezone, for snapshots.
    Snapshot,
    /// Three forecast days in UTC, for the raw passthrough.
    Raw,
}

impl RequestProfile {
    fn forecast_days(self) -> u32 {
        match self {
            RequestProfile::Snapshot => 2,
            RequestProfile::Raw => 3,
        }
    }

    fn hourly_timezone(self) -> &'static str {
        match self {
            RequestProfile::Snapshot => "auto",
            RequestProfile::Raw => "UTC",
        }
    }
}

#[derive(Clone)]
pub struct FanOutCoordinator {
    client: Arc<dyn UpstreamClient>,
    timeout: Duration,
}

impl FanOutCoordinator {
    pub fn new(client: Arc<dyn UpstreamClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch all three feeds concurrently and wait for every one to settle.
    ///
    /// A failed feed never short-circuits the others; it just comes back as
    /// a failed outcome.
    pub async fn fetch_all(&self, location: Location, profile: RequestProfile) -> FeedOutcomes {
        let forecast = forecast_params(location, profile);
        let air = air_quality_params(location, profile);
        let flood = flood_params(location);

        let (weather, air, flood) = tokio::join!(
            self.fetch(Feed::Forecast, &forecast),
            self.fetch(Feed::AirQuality, &air),
            self.fetch(Feed::Flood, &flood),
        );

        FeedOutcomes {
            weather,
            air,
            flood,
        }
    }

    async fn fetch(&self, feed: Feed, params: &QueryParams) -> Outcome<Value> {
        let outcome = self.client.fetch(feed, params, self.timeout).await;
        if let Some(error) = outcome.error() {
            tracing::warn!(%feed, error, "upstream feed failed");
        }
        outcome
    }
}

fn coordinates(location: Location) -> QueryParams {
    vec![
        ("latitude", location.lat.to_string()),
        ("longitude", location.lon.to_string()),
    ]
}

fn forecast_params(location: Location, profile: RequestProfile) -> QueryParams {
    let mut params = coordinates(location);
    params.push(("hourly", FORECAST_HOURLY.to_string()));
    params.push(("forecast_days", profile.forecast_days().to_string()));
    params.push(("timezone", profile.hourly_timezone().to_string()));
    params
}

fn air_quality_params(location: Location, profile: RequestProfile) -> QueryParams {
    let mut params = coordinates(location);
    params.push(("hourly", AIR_QUALITY_HOURLY.to_string()));
    params.push(("timezone", profile.hourly_timezone().to_string()));
    params
}

fn flood_params(location: Location) -> QueryParams {
    let mut params = coordinates(location);
    params.push(("daily", FLOOD_DAILY.to_string()));
    params.push(("forecast_days", FLOOD_FORECAST_DAYS.to_string()));
    params.push(("timezone", "auto".to_string()));
    params
}
