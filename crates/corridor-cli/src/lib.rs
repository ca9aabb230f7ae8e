//! Corridor CLI - command line tools for the corridor GeoJSON service.
//!
//! Binaries:
//! - fetch_features: download one dataset, optionally bbox-filtered
//! - check_health: print the server's mode and database status

pub mod summary;

pub use summary::{parse_bbox, DatasetSummary};
