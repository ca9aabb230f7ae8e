//! REST API routes.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::{datasets, health};
use crate::config::Config;
use crate::state::AppState;

/// URL prefix of the static 3D tiles.
pub const TILES_PREFIX: &str = "/3dtiles";

/// Create the API router.
pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/2d-corridors", get(datasets::corridors_2d))
        .route("/3d-network", get(datasets::network_3d))
        .route("/hdb-footprints", get(datasets::hdb_footprints));

    // Cesium resolves tile content relative to e.g. /3dtiles/tileset.json
    if config.tiles_dir.is_dir() {
        tracing::info!(
            "Serving 3D tiles from {} under {}",
            config.tiles_dir.display(),
            TILES_PREFIX
        );
        router.nest_service(TILES_PREFIX, ServeDir::new(&config.tiles_dir))
    } else {
        tracing::info!(
            "Tiles directory {} not found, {} disabled",
            config.tiles_dir.display(),
            TILES_PREFIX
        );
        router
    }
}
