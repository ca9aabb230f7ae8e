//! Corridor service client.

use corridor_core::{BboxQuery, BoundingBox, DatasetKind, FeatureCollection};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub mode: String,
    #[serde(default)]
    pub database: Option<String>,
}

impl HealthStatus {
    /// Whether the server applies bounding-box filters.
    pub fn filters_bbox(&self) -> bool {
        self.mode == "database"
    }

    /// Database check result; `true` in static mode where there is none.
    pub fn database_ok(&self) -> bool {
        self.database.as_deref().map_or(true, |db| db == "ok")
    }
}

/// A fetched dataset plus the server's report on bbox handling.
#[derive(Debug, Clone)]
pub struct DatasetResponse {
    pub collection: FeatureCollection,
    /// `applied`, `ignored` or `none`; absent when talking to older servers.
    pub bbox_filtering: Option<String>,
}

/// Client for the corridor service.
pub struct CorridorClient {
    base_url: String,
    client: reqwest::Client,
}

impl CorridorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dataset_url(&self, kind: DatasetKind) -> String {
        format!("{}{}", self.base_url, kind.route())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = check_status(self.client.get(&url).send().await?).await?;
        decode(&response.bytes().await?)
    }

    /// Fetch a dataset, optionally restricted to `bbox`.
    pub async fn fetch(
        &self,
        kind: DatasetKind,
        bbox: Option<BoundingBox>,
    ) -> Result<DatasetResponse> {
        let url = self.dataset_url(kind);
        let query = BboxQuery::from(bbox);
        tracing::debug!("GET {} {:?}", url, query);

        let response = check_status(self.client.get(&url).query(&query).send().await?).await?;
        let bbox_filtering = response
            .headers()
            .get("x-bbox-filtering")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let collection: FeatureCollection = decode(&response.bytes().await?)?;

        Ok(DatasetResponse {
            collection,
            bbox_filtering,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_urls_trim_trailing_slash() {
        let client = CorridorClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.dataset_url(DatasetKind::HdbFootprints),
            "http://localhost:8000/hdb-footprints"
        );
    }

    #[test]
    fn health_modes() {
        let db: HealthStatus = serde_json::from_str(
            r#"{"status":"ok","mode":"database","database":"connection refused"}"#,
        )
        .unwrap();
        assert!(db.filters_bbox());
        assert!(!db.database_ok());

        let files: HealthStatus =
            serde_json::from_str(r#"{"status":"ok","mode":"static_file_serving"}"#).unwrap();
        assert!(!files.filters_bbox());
        assert!(files.database_ok());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode::<HealthStatus>(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let err = decode::<FeatureCollection>(br#"{"type":"Feature"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let ok: FeatureCollection =
            decode(br#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(ok.features.is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = CorridorClient::new("http://127.0.0.1:1");
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
