//! HTTP API for the corridor server.

pub mod datasets;
pub mod health;
pub mod request_id;
mod routes;

use crate::config::Config;
use crate::state::AppState;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn routes(config: &Config) -> Router<Arc<AppState>> {
    routes::create_router(config)
}

/// The complete service: routes, state and middleware.
pub fn app(config: &Config, state: Arc<AppState>) -> Router {
    routes(config)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::ensure_request_id))
        .layer(CorsLayer::permissive())
}
