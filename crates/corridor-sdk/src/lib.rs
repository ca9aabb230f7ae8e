//! Corridor SDK - typed access to the corridor GeoJSON service.

pub mod client;

pub use client::{ClientError, CorridorClient, DatasetResponse, HealthStatus};
pub use corridor_core::{BoundingBox, DatasetKind, FeatureCollection};
