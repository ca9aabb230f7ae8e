//! Row to FeatureCollection assembly shared by every dataset kind.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::Value;

use crate::dataset::ID_COLUMN;

/// One query result: the internal id, the dataset's fixed attribute columns
/// and the geometry as GeoJSON produced by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRow {
    pub id: i64,
    pub properties: JsonObject,
    pub geometry: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry is null")]
    Null,
    #[error("geometry is not valid GeoJSON: {0}")]
    Invalid(#[from] geojson::Error),
}

/// Parse a store geometry value. Null and malformed values are both errors.
pub fn parse_geometry(value: Value) -> Result<Geometry, GeometryError> {
    if value.is_null() {
        return Err(GeometryError::Null);
    }
    Ok(Geometry::from_json_value(value)?)
}

/// Turn one row into a feature, or `None` when it has no usable geometry.
pub fn row_to_feature(row: GeoRow) -> Option<Feature> {
    let geometry = parse_geometry(row.geometry?).ok()?;
    let mut properties = row.properties;
    properties.shift_remove(ID_COLUMN);

    Some(Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Build a collection from rows, keeping row order and dropping rows
/// without geometry.
pub fn assemble<I>(rows: I) -> FeatureCollection
where
    I: IntoIterator<Item = GeoRow>,
{
    FeatureCollection {
        bbox: None,
        features: rows.into_iter().filter_map(row_to_feature).collect(),
        foreign_members: None,
    }
}

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Remove features whose geometry is null. Returns how many were removed.
pub fn drop_null_geometries(collection: &mut FeatureCollection) -> usize {
    let before = collection.features.len();
    collection
        .features
        .retain(|feature| feature.geometry.is_some());
    before - collection.features.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: i64, properties: Value, geometry: Option<Value>) -> GeoRow {
        GeoRow {
            id,
            properties: properties.as_object().cloned().unwrap(),
            geometry,
        }
    }

    fn point(lon: f64, lat: f64) -> Value {
        json!({ "type": "Point", "coordinates": [lon, lat] })
    }

    #[test]
    fn drops_rows_without_geometry() {
        let rows = vec![
            row(1, json!({ "feat_id": 10 }), Some(point(103.85, 1.35))),
            row(2, json!({ "feat_id": 11 }), None),
            row(3, json!({ "feat_id": 12 }), Some(Value::Null)),
            row(4, json!({ "feat_id": 13 }), Some(json!({ "type": "Nope" }))),
            row(5, json!({ "feat_id": 14 }), Some(point(103.86, 1.36))),
        ];

        let collection = assemble(rows);
        let ids: Vec<_> = collection
            .features
            .iter()
            .map(|f| f.property("feat_id").cloned().unwrap())
            .collect();
        assert_eq!(ids, vec![json!(10), json!(14)]);
    }

    #[test]
    fn strips_internal_id_and_keeps_values() {
        let feature = row_to_feature(row(
            7,
            json!({ "id": 7, "height": 33.5, "levels": 12, "feat_id": "B-1" }),
            Some(point(103.8, 1.3)),
        ))
        .unwrap();

        let properties = feature.properties.as_ref().unwrap();
        assert!(!properties.contains_key(ID_COLUMN));
        assert_eq!(properties["height"], json!(33.5));
        assert_eq!(properties["levels"], json!(12));
        assert_eq!(properties["feat_id"], json!("B-1"));
        let keys: Vec<_> = properties.keys().cloned().collect();
        assert_eq!(keys, vec!["height", "levels", "feat_id"]);
    }

    #[test]
    fn serializes_as_feature_collection() {
        let collection = assemble(vec![row(
            1,
            json!({ "corridor_type": "trunk", "min_altitude": 60 }),
            Some(json!({
                "type": "LineString",
                "coordinates": [[103.8, 1.3, 60.0], [103.9, 1.4, 60.0]]
            })),
        )]);

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        let feature = &value["features"][0];
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["properties"]["corridor_type"], "trunk");
        assert!(feature.get("id").is_none());
    }

    #[test]
    fn empty_input_gives_empty_collection() {
        let value = serde_json::to_value(assemble(Vec::new())).unwrap();
        assert_eq!(value, json!({ "type": "FeatureCollection", "features": [] }));
        assert_eq!(
            serde_json::to_value(empty_collection()).unwrap(),
            json!({ "type": "FeatureCollection", "features": [] })
        );
    }

    #[test]
    fn null_geometry_features_are_removed_from_loaded_collections() {
        let mut collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "a": 1 }, "geometry": null },
                { "type": "Feature", "properties": { "a": 2 }, "geometry": point(1.0, 2.0) }
            ]
        }))
        .unwrap();

        assert_eq!(drop_null_geometries(&mut collection), 1);
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].property("a"), Some(&json!(2)));
    }
}
