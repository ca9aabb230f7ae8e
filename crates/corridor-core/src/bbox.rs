//! Bounding-box filters for dataset requests.

use serde::{Deserialize, Serialize};

/// SRID of every stored geometry and of the filter rectangle.
pub const WGS84_SRID: i32 = 4326;

/// Axis-aligned rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Values in `ST_MakeEnvelope` argument order.
    pub fn as_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

/// The four optional bbox query parameters as they arrive on the wire.
///
/// A filter exists only when all four are present. Any partial combination
/// is treated exactly like no parameters at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BboxQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lat: Option<f64>,
}

impl BboxQuery {
    /// True when none of the parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.min_lon.is_none()
            && self.min_lat.is_none()
            && self.max_lon.is_none()
            && self.max_lat.is_none()
    }

    /// The rectangle, if and only if it is fully specified.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match (self.min_lon, self.min_lat, self.max_lon, self.max_lat) {
            (Some(min_lon), Some(min_lat), Some(max_lon), Some(max_lat)) => {
                Some(BoundingBox::new(min_lon, min_lat, max_lon, max_lat))
            }
            _ => None,
        }
    }
}

impl From<BoundingBox> for BboxQuery {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            min_lon: Some(bbox.min_lon),
            min_lat: Some(bbox.min_lat),
            max_lon: Some(bbox.max_lon),
            max_lat: Some(bbox.max_lat),
        }
    }
}

impl From<Option<BoundingBox>> for BboxQuery {
    fn from(bbox: Option<BoundingBox>) -> Self {
        bbox.map(Self::from).unwrap_or_default()
    }
}
