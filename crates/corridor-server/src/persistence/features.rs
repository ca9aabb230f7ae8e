//! Bounding-box filtered feature queries.

use corridor_core::{
    BoundingBox, DatasetKind, GeoRow, JsonObject, GEOMETRY_COLUMN, ID_COLUMN, WGS84_SRID,
};
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct FeatureRow {
    id: i64,
    properties: Json<JsonObject>,
    geom: Option<serde_json::Value>,
}

impl From<FeatureRow> for GeoRow {
    fn from(row: FeatureRow) -> Self {
        GeoRow {
            id: row.id,
            properties: row.properties.0,
            geometry: row.geom,
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Build the select for one dataset.
///
/// Attributes are packed by the database into one JSON object keyed by the
/// column names, so values reach the client with the types the store holds.
/// The bbox, when present, is bound as four parameters.
pub fn build_query(kind: DatasetKind, bbox: Option<&BoundingBox>) -> QueryBuilder<'static, Postgres> {
    let properties = kind
        .columns()
        .iter()
        .map(|column| format!("{}, {}", quote_literal(column), quote_ident(column)))
        .collect::<Vec<_>>()
        .join(", ");

    let geom = quote_ident(GEOMETRY_COLUMN);
    let id = quote_ident(ID_COLUMN);

    let mut query = QueryBuilder::new(format!(
        "SELECT {id}::bigint AS id, json_build_object({properties}) AS properties, \
         ST_AsGeoJSON({geom})::json AS geom FROM {}",
        quote_ident(kind.relation()),
    ));

    if let Some(bbox) = bbox {
        query.push(format!(" WHERE ST_Intersects({geom}, ST_MakeEnvelope("));
        let mut args = query.separated(", ");
        for value in bbox.as_array() {
            args.push_bind(value);
        }
        args.push_unseparated(format!(", {WGS84_SRID}))"));
    }

    query.push(format!(" ORDER BY {id}"));
    query
}

/// Fetch the rows of a dataset, ordered by internal id.
pub async fn fetch_features(
    pool: &PgPool,
    kind: DatasetKind,
    bbox: Option<BoundingBox>,
) -> Result<Vec<GeoRow>, sqlx::Error> {
    let mut query = build_query(kind, bbox.as_ref());
    let rows = query
        .build_query_as::<FeatureRow>()
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        dataset = %kind,
        filtered = bbox.is_some(),
        rows = rows.len(),
        "Fetched dataset rows"
    );

    Ok(rows.into_iter().map(GeoRow::from).collect())
}
