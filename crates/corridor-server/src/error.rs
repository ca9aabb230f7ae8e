//! Errors surfaced by the dataset endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection or query failure against the spatial database.
    #[error("spatial store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    /// A bbox parameter that is not a number.
    #[error("malformed query parameter: {0}")]
    MalformedQueryParameter(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedQueryParameter(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::StoreUnavailable(_) => "store_unavailable",
            ApiError::MalformedQueryParameter(_) => "malformed_query_parameter",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StoreUnavailable(err) => tracing::error!("Dataset query failed: {}", err),
            ApiError::MalformedQueryParameter(msg) => tracing::debug!("Rejected query: {}", msg),
        }
        let body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
