// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::environment_service::EnvironmentService;
use crate::application::fan_out::FanOutCoordinator;
use crate::application::places_service::PlacesService;
use crate::application::upstream_client::UpstreamClient;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::open_meteo_client::OpenMeteoClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("env_monitor=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;

    // Create the pooled upstream client (infrastructure layer)
    let client: Arc<dyn UpstreamClient> = Arc::new(
        OpenMeteoClient::new(config.upstream.clone()).context("Failed to build HTTP client")?,
    );

    // Create services (application layer)
    let coordinator = FanOutCoordinator::new(client.clone(), config.upstream.feed_timeout());
    let environment_service = EnvironmentService::new(coordinator);
    let places_service = PlacesService::new(client, config.upstream.geocoding_timeout());

    // Create application state
    let state = Arc::new(AppState {
        service_name: config.server.service_name.clone(),
        environment_service,
        places_service,
    });

    // Build router (presentation layer)
    let app = router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;
    tracing::info!(
        "Starting {} on {}",
        config.server.service_name,
        config.server.listen_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // The router, and with it the upstream connection pool, is dropped here.
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
