//! Whole-dataset GeoJSON files held in memory for the static mode.
//!
//! The three files are read once before the listener binds. Each collection
//! is rendered to its JSON body at load time and never changes afterwards,
//! so handlers only clone a reference-counted buffer.

use axum::body::Bytes;
use corridor_core::{
    drop_null_geometries, empty_collection, DatasetKind, Feature, FeatureCollection,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum DataFileUnreadable {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path} as JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{path} is a {found}, not a FeatureCollection")]
    NotFeatureCollection { path: PathBuf, found: String },
}

// Envelope only. Features are parsed one at a time and bad ones skipped.
#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

/// Use `path` if it exists, otherwise the same file name in the working
/// directory when that exists. Falls back to `path` unchanged.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }
    if let Some(name) = path.file_name() {
        let local = PathBuf::from(name);
        if local.exists() {
            return local;
        }
    }
    path.to_path_buf()
}

/// Read and parse one dataset file.
pub fn load(path: &Path) -> Result<FeatureCollection, DataFileUnreadable> {
    let resolved = resolve_path(path);
    let raw = std::fs::read(&resolved).map_err(|source| DataFileUnreadable::Read {
        path: resolved.clone(),
        source,
    })?;
    let raw: RawCollection =
        serde_json::from_slice(&raw).map_err(|source| DataFileUnreadable::Parse {
            path: resolved.clone(),
            source,
        })?;
    if raw.kind != "FeatureCollection" {
        return Err(DataFileUnreadable::NotFeatureCollection {
            path: resolved,
            found: raw.kind,
        });
    }

    let mut collection = empty_collection();
    for (index, value) in raw.features.into_iter().enumerate() {
        match serde_json::from_value::<Feature>(value) {
            Ok(feature) => collection.features.push(feature),
            Err(err) => warn!(
                "Skipping feature #{} in {}: {}",
                index,
                resolved.display(),
                err
            ),
        }
    }

    let dropped = drop_null_geometries(&mut collection);
    if dropped > 0 {
        warn!(
            "Dropped {} features without geometry from {}",
            dropped,
            resolved.display()
        );
    }
    Ok(collection)
}

/// Like [`load`], but logs the failure and yields an empty collection.
pub fn load_or_empty(path: &Path) -> FeatureCollection {
    match load(path) {
        Ok(collection) => collection,
        Err(err) => {
            warn!("Serving empty dataset: {}", err);
            empty_collection()
        }
    }
}

/// A dataset pre-rendered as its response body.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    feature_count: usize,
    body: Bytes,
}

impl CachedDataset {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let body = match serde_json::to_vec(collection) {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to render cached dataset: {}", err);
                return Self::empty();
            }
        };
        Self {
            feature_count: collection.features.len(),
            body: Bytes::from(body),
        }
    }

    pub fn empty() -> Self {
        Self {
            feature_count: 0,
            body: Bytes::from_static(br#"{"type":"FeatureCollection","features":[]}"#),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn body(&self) -> Bytes {
        self.body.clone()
    }
}

/// The three datasets, immutable after construction.
#[derive(Debug, Clone)]
pub struct StaticDatasets {
    corridors_2d: CachedDataset,
    network_3d: CachedDataset,
    hdb_footprints: CachedDataset,
}

impl StaticDatasets {
    /// Load every dataset from the paths in `config`. Never fails.
    pub fn load(config: &Config) -> Self {
        let load_kind = |kind: DatasetKind| {
            let path = config.dataset_path(kind);
            let dataset = CachedDataset::from_collection(&load_or_empty(path));
            info!(
                "Loaded {} features for {} from {}",
                dataset.feature_count(),
                kind,
                path.display()
            );
            dataset
        };

        Self {
            corridors_2d: load_kind(DatasetKind::Corridors2d),
            network_3d: load_kind(DatasetKind::Network3d),
            hdb_footprints: load_kind(DatasetKind::HdbFootprints),
        }
    }

    pub fn get(&self, kind: DatasetKind) -> &CachedDataset {
        match kind {
            DatasetKind::Corridors2d => &self.corridors_2d,
            DatasetKind::Network3d => &self.network_3d,
            DatasetKind::HdbFootprints => &self.hdb_footprints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("corridor-cache-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_collection_and_drops_null_geometry() {
        let path = temp_file(
            "hdb_footprints.geojson",
            &json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "feat_id": 1, "height": 30.0, "levels": 10 },
                        "geometry": { "type": "Point", "coordinates": [103.85, 1.29] }
                    },
                    { "type": "Feature", "properties": { "feat_id": 2 }, "geometry": null }
                ]
            })
            .to_string(),
        );

        let collection = load(&path).unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].property("feat_id"), Some(&json!(1)));
    }

    #[test]
    fn unreadable_file_degrades_to_empty() {
        let missing = std::env::temp_dir()
            .join(format!("corridor-missing-{}", uuid::Uuid::new_v4()))
            .join("2D_safe_corridors_prioritized.geojson");
        assert!(matches!(load(&missing), Err(DataFileUnreadable::Read { .. })));
        assert!(load_or_empty(&missing).features.is_empty());
    }

    #[test]
    fn invalid_json_degrades_to_empty() {
        let path = temp_file("3D_merged_network.geojson", "{ not json");
        assert!(matches!(load(&path), Err(DataFileUnreadable::Parse { .. })));
        assert!(load_or_empty(&path).features.is_empty());
    }

    #[test]
    fn malformed_feature_is_skipped_not_fatal() {
        let path = temp_file(
            "2D_safe_corridors_prioritized.geojson",
            &json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "PLN_AREA_N": "BEDOK" },
                        "geometry": { "type": "Point", "coordinates": [103.93, 1.32] }
                    },
                    {
                        "type": "Feature",
                        "properties": { "PLN_AREA_N": "BROKEN" },
                        "geometry": { "type": "Hexagon", "coordinates": [] }
                    },
                    { "type": "NotAFeature" },
                    {
                        "type": "Feature",
                        "properties": { "PLN_AREA_N": "TAMPINES" },
                        "geometry": { "type": "Point", "coordinates": [103.95, 1.35] }
                    }
                ]
            })
            .to_string(),
        );

        let collection = load(&path).unwrap();
        let names: Vec<_> = collection
            .features
            .iter()
            .filter_map(|f| f.property("PLN_AREA_N").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["BEDOK", "TAMPINES"]);
    }

    #[test]
    fn non_collection_file_is_unreadable() {
        let path = temp_file(
            "hdb_footprints.geojson",
            &json!({
                "type": "Feature",
                "properties": {},
                "geometry": { "type": "Point", "coordinates": [103.85, 1.29] }
            })
            .to_string(),
        );
        assert!(matches!(
            load(&path),
            Err(DataFileUnreadable::NotFeatureCollection { .. })
        ));
        assert!(load_or_empty(&path).features.is_empty());
    }

    #[test]
    fn falls_back_to_working_directory() {
        // Tests run with the crate directory as working directory.
        let elsewhere = Path::new("/nonexistent-corridor-dir/Cargo.toml");
        assert_eq!(resolve_path(elsewhere), PathBuf::from("Cargo.toml"));

        let nowhere = Path::new("/nonexistent-corridor-dir/none.geojson");
        assert_eq!(resolve_path(nowhere), nowhere.to_path_buf());
    }

    #[test]
    fn empty_body_matches_rendered_empty_collection() {
        let rendered = CachedDataset::from_collection(&empty_collection());
        let parsed: Value = serde_json::from_slice(&rendered.body()).unwrap();
        let canned: Value = serde_json::from_slice(&CachedDataset::empty().body()).unwrap();
        assert_eq!(parsed, canned);
        assert_eq!(rendered.feature_count(), 0);
    }
}
