//! Health endpoint. Always answers 200; the body carries the details.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::{AppState, Backend};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Active deployment mode, so clients can tell whether bbox filters apply.
    pub mode: &'static str,
    /// `"ok"` or the connectivity check's error text. Absent in static mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.backend() {
        Backend::Database(db) => Some(match db.ping().await {
            Ok(()) => "ok".to_string(),
            Err(err) => {
                tracing::warn!("Health check failed: {}", err);
                err.to_string()
            }
        }),
        Backend::StaticFiles(_) => None,
    };

    Json(HealthResponse {
        status: "ok",
        mode: state.mode().as_str(),
        database,
    })
}
