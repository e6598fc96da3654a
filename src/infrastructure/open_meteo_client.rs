// Open-Meteo HTTP client - reqwest implementation of UpstreamClient
use crate::application::upstream_client::{Feed, QueryParams, UpstreamClient};
use crate::domain::outcome::Outcome;
use crate::infrastructure::config::UpstreamSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {feed} failed: {source}")]
    Transport {
        feed: Feed,
        #[source]
        source: reqwest::Error,
    },
    #[error("{feed} responded with status {status}")]
    Status {
        feed: Feed,
        status: reqwest::StatusCode,
    },
    #[error("{feed} returned an unreadable body: {source}")]
    Decode {
        feed: Feed,
        #[source]
        source: reqwest::Error,
    },
}

/// Pooled client shared by every request. Built once at startup and dropped
/// with the application state on shutdown.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    settings: UpstreamSettings,
}

impl OpenMeteoClient {
    pub fn new(settings: UpstreamSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { http, settings })
    }

    async fn get_json(
        &self,
        feed: Feed,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<Value, UpstreamError> {
        let url = self.settings.url(feed);
        tracing::debug!(%feed, url, "requesting upstream feed");

        let response = self
            .http
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { feed, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { feed, status });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Decode { feed, source })
    }
}

#[async_trait]
impl UpstreamClient for OpenMeteoClient {
    async fn fetch(&self, feed: Feed, params: &QueryParams, timeout: Duration) -> Outcome<Value> {
        match self.get_json(feed, params, timeout).await {
            Ok(data) => Outcome::success(data),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}
