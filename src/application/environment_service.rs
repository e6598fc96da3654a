// Environment service - use case for building a snapshot of one location
use crate::application::fan_out::{FanOutCoordinator, RequestProfile};
use crate::domain::feed::FeedOutcomes;
use crate::domain::snapshot::{EnvironmentSnapshot, Location};
use chrono::Utc;

#[derive(Clone)]
pub struct EnvironmentService {
    coordinator: FanOutCoordinator,
}

impl EnvironmentService {
    pub fn new(coordinator: FanOutCoordinator) -> Self {
        Self { coordinator }
    }

    /// Aggregate the three feeds into a snapshot. Upstream failures are
    /// folded into the snapshot, so this always produces one.
    pub async fn snapshot(&self, location: Location) -> EnvironmentSnapshot {
        let feeds = self
            .coordinator
            .fetch_all(location, RequestProfile::Snapshot)
            .await;

        let snapshot = EnvironmentSnapshot::assemble(location, &feeds, Utc::now());
        tracing::info!(
            lat = location.lat,
            lon = location.lon,
            failed_feeds = [&feeds.weather, &feeds.air, &feeds.flood]
                .iter()
                .filter(|o| !o.is_ok())
                .count(),
            "built environment snapshot"
        );
        snapshot
    }

    /// Raw outcome envelopes, untouched.
    pub async fn raw(&self, location: Location) -> FeedOutcomes {
        self.coordinator
            .fetch_all(location, RequestProfile::Raw)
            .await
    }
}
