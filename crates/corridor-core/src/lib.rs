//! Core data model for the corridor GeoJSON service: datasets, bounding
//! boxes and the row to FeatureCollection assembler.

pub mod assemble;
pub mod bbox;
pub mod dataset;

pub use assemble::{
    assemble, drop_null_geometries, empty_collection, parse_geometry, row_to_feature,
    GeoRow, GeometryError,
};
pub use bbox::{BboxQuery, BoundingBox, WGS84_SRID};
pub use dataset::{DatasetKind, UnknownDataset, GEOMETRY_COLUMN, ID_COLUMN};
pub use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
