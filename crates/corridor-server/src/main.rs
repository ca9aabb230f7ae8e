//! Corridor server - GeoJSON corridor datasets and 3D tiles over HTTP.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corridor_server::api;
use corridor_server::config::{Config, ServeMode};
use corridor_server::persistence;
use corridor_server::state::AppState;
use corridor_server::static_cache::StaticDatasets;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let json_logs = std::env::var("CORRIDOR_LOG_FORMAT")
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    tracing_subscriber::registry()
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("corridor_server=debug".parse()?))
        .init();

    tracing::info!("Starting corridor server...");

    let config = Config::from_env();
    tracing::info!("Serving mode: {}", config.mode.as_str());

    let state = match config.mode {
        ServeMode::Database => {
            let db = persistence::connect_lazy(
                &config.database_url,
                config.database_max_connections,
                Duration::from_secs(config.database_acquire_timeout_s),
            )
            .context("invalid DATABASE_URL")?;
            // Degraded start: the service comes up even if the store is down.
            if let Err(err) = db.ping().await {
                tracing::warn!("Database not reachable at startup: {}", err);
            }
            AppState::with_database(db)
        }
        ServeMode::StaticFiles => {
            let loader_config = config.clone();
            let datasets =
                tokio::task::spawn_blocking(move || StaticDatasets::load(&loader_config))
                    .await
                    .context("static dataset loader panicked")?;
            AppState::with_static_files(datasets)
        }
    };

    let app = api::app(&config, Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
