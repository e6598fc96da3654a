use serde::Deserialize;
use std::time::Duration;

use crate::application::upstream_client::Feed;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen_addr: String,
    pub service_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub forecast_url: String,
    pub air_quality_url: String,
    pub flood_url: String,
    pub geocoding_url: String,
    pub feed_timeout_secs: u64,
    pub geocoding_timeout_secs: u64,
    pub user_agent: String,
}

impl UpstreamSettings {
    pub fn url(&self, feed: Feed) -> &str {
        match feed {
            Feed::Forecast => &self.forecast_url,
            Feed::AirQuality => &self.air_quality_url,
            Feed::Flood => &self.flood_url,
            Feed::Geocoding => &self.geocoding_url,
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(self.geocoding_timeout_secs)
    }
}

/// Defaults, then `config/env-monitor.{toml,yaml,json}` if present, then
/// `ENV_MONITOR_*` environment variables (`__` separates nested keys).
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config_builder()?
        .add_source(config::File::with_name("config/env-monitor").required(false))
        .add_source(
            config::Environment::with_prefix("ENV_MONITOR")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn config_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.listen_addr", "0.0.0.0:8080")?
        .set_default("server.service_name", "env-monitor-api")?
        .set_default("upstream.forecast_url", "https://api.open-meteo.com/v1/forecast")?
        .set_default(
            "upstream.air_quality_url",
            "https://air-quality-api.open-meteo.com/v1/air-quality",
        )?
        .set_default("upstream.flood_url", "https://flood-api.open-meteo.com/v1/flood")?
        .set_default(
            "upstream.geocoding_url",
            "https://geocoding-api.open-meteo.com/v1/search",
        )?
        .set_default("upstream.feed_timeout_secs", 20)?
        .set_default("upstream.geocoding_timeout_secs", 15)?
        .set_default("upstream.user_agent", "env-monitor/0.1")?)
}
