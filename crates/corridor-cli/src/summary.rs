//! Helpers shared by the CLI binaries.

use anyhow::{bail, Context, Result};
use corridor_core::{BoundingBox, FeatureCollection};
use std::collections::BTreeMap;
use std::fmt;

/// Parse `min_lon,min_lat,max_lon,max_lat`.
pub fn parse_bbox(value: &str) -> Result<BoundingBox> {
    let parts = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    match parts.as_slice() {
        [min_lon, min_lat, max_lon, max_lat] => {
            Ok(BoundingBox::new(*min_lon, *min_lat, *max_lon, *max_lat))
        }
        _ => bail!(
            "expected min_lon,min_lat,max_lon,max_lat but got {} values",
            parts.len()
        ),
    }
}

fn geometry_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Feature counts of a downloaded collection, by geometry type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub features: usize,
    pub geometry_types: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn of(collection: &FeatureCollection) -> Self {
        let mut geometry_types = BTreeMap::new();
        for feature in &collection.features {
            let name = feature
                .geometry
                .as_ref()
                .map(|g| geometry_name(&g.value))
                .unwrap_or("None");
            *geometry_types.entry(name.to_string()).or_insert(0) += 1;
        }
        Self {
            features: collection.features.len(),
            geometry_types,
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} features", self.features)?;
        for (name, count) in &self.geometry_types {
            write!(f, ", {} {}", count, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bbox() {
        let bbox = parse_bbox("103.8, 1.3,103.9,1.4").unwrap();
        assert_eq!(bbox, BoundingBox::new(103.8, 1.3, 103.9, 1.4));
        assert!(parse_bbox("103.8,1.3,103.9").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }

    #[test]
    fn summarizes_geometry_types() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1.0, 2.0] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1.5, 2.5] } },
                { "type": "Feature", "properties": {}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                } }
            ]
        }))
        .unwrap();

        let summary = DatasetSummary::of(&collection);
        assert_eq!(summary.features, 3);
        assert_eq!(summary.to_string(), "3 features, 2 Point, 1 Polygon");
    }
}
