//! Dataset endpoints: `/2d-corridors`, `/3d-network`, `/hdb-footprints`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, State},
    http::{header, request::Parts, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use corridor_core::{assemble, BboxQuery, DatasetKind};
use std::sync::Arc;

use crate::error::ApiError;
use crate::persistence::fetch_features;
use crate::state::{AppState, Backend};

/// Tells the client what happened to the bbox: `applied`, `ignored` or `none`.
pub const BBOX_FILTERING_HEADER: HeaderName = HeaderName::from_static("x-bbox-filtering");

/// Bbox query parameters, rejected as [`ApiError::MalformedQueryParameter`]
/// when a value is not a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct BboxParams(pub BboxQuery);

#[async_trait]
impl<S> FromRequestParts<S> for BboxParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<BboxQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedQueryParameter(rejection.body_text()))?;
        Ok(BboxParams(query))
    }
}

async fn serve_dataset(
    state: &AppState,
    kind: DatasetKind,
    query: BboxQuery,
) -> Result<Response, ApiError> {
    match state.backend() {
        Backend::Database(db) => {
            let bbox = query.bounding_box();
            let rows = fetch_features(db.pool(), kind, bbox).await?;
            let row_count = rows.len();
            let collection = assemble(rows);
            if collection.features.len() < row_count {
                tracing::debug!(
                    "Skipped {} {} rows without geometry",
                    row_count - collection.features.len(),
                    kind
                );
            }
            let filtering = if bbox.is_some() { "applied" } else { "none" };
            Ok(([(BBOX_FILTERING_HEADER, filtering)], Json(collection)).into_response())
        }
        Backend::StaticFiles(datasets) => {
            let filtering = if query.is_empty() { "none" } else { "ignored" };
            Ok((
                [
                    (header::CONTENT_TYPE, "application/json"),
                    (BBOX_FILTERING_HEADER, filtering),
                ],
                datasets.get(kind).body(),
            )
                .into_response())
        }
    }
}

pub async fn corridors_2d(
    State(state): State<Arc<AppState>>,
    BboxParams(query): BboxParams,
) -> Result<Response, ApiError> {
    serve_dataset(&state, DatasetKind::Corridors2d, query).await
}

pub async fn network_3d(
    State(state): State<Arc<AppState>>,
    BboxParams(query): BboxParams,
) -> Result<Response, ApiError> {
    serve_dataset(&state, DatasetKind::Network3d, query).await
}

pub async fn hdb_footprints(
    State(state): State<Arc<AppState>>,
    BboxParams(query): BboxParams,
) -> Result<Response, ApiError> {
    serve_dataset(&state, DatasetKind::HdbFootprints, query).await
}
