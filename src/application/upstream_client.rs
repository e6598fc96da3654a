// Upstream client trait - one GET against a named Open-Meteo endpoint
use crate::domain::outcome::Outcome;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Upstream endpoints this service reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    Forecast,
    AirQuality,
    Flood,
    Geocoding,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feed::Forecast => "forecast",
            Feed::AirQuality => "air_quality",
            Feed::Flood => "flood",
            Feed::Geocoding => "geocoding",
        };
        f.write_str(name)
    }
}

/// Query string parameters for an upstream request.
pub type QueryParams = Vec<(&'static str, String)>;

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issue a single GET and settle it into an [`Outcome`].
    ///
    /// Implementations must not return errors or panic: transport failures,
    /// timeouts, non-2xx statuses and undecodable bodies all come back as a
    /// failed outcome. `timeout` bounds this call only.
    async fn fetch(&self, feed: Feed, params: &QueryParams, timeout: Duration) -> Outcome<Value>;
}
