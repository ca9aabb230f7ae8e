//! The three published datasets and their fixed column sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Internal row identifier. Used for ordering only, never published.
pub const ID_COLUMN: &str = "id";

/// Geometry column in every relation.
pub const GEOMETRY_COLUMN: &str = "geom";

const CORRIDORS_2D_COLUMNS: &[&str] = &[
    "OBJECTID",
    "PLN_AREA_N",
    "PLN_AREA_C",
    "CA_IND",
    "REGION_N",
    "REGION_C",
    "INC_CRC",
    "FMEL_UPD_D",
    "SHAPE.AREA",
    "SHAPE.LEN",
    "Total_Population",
    "Total_Males",
    "Total_Females",
    "LabourForce_Total_Total",
    "LabourForce_Total_Males",
    "LabourForce_Total_Females",
    "LabourForce_Employed_Total",
    "LabourForce_Employed_Males",
    "LabourForce_Employed_Females",
    "LabourForce_Unemployed_Total",
    "LabourForce_Unemployed_Males",
    "LabourForce_Unemployed_Females",
    "OutsidetheLabourForce_Total",
    "OutsidetheLabourForce_Males",
    "OutsidetheLabourForce_Females",
    "Area_km2",
    "Pop_Density",
    "priorityID",
];

const NETWORK_3D_COLUMNS: &[&str] = &[
    "min_altitude",
    "corridor_type",
    "max_altitude",
    "volume_m3",
    "priorityID",
];

const HDB_FOOTPRINTS_COLUMNS: &[&str] = &["feat_id", "height", "levels"];

/// A published dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// 2D safe-corridor polygons with planning-area demographics.
    Corridors2d,
    /// 3D flight-corridor network volumes.
    Network3d,
    /// Public-housing building footprints.
    HdbFootprints,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Corridors2d,
        DatasetKind::Network3d,
        DatasetKind::HdbFootprints,
    ];

    /// Source relation in the spatial database.
    pub fn relation(self) -> &'static str {
        match self {
            DatasetKind::Corridors2d => "corridors_2d_4326",
            DatasetKind::Network3d => "network_3d_4326",
            DatasetKind::HdbFootprints => "hdb_footprints_4326",
        }
    }

    /// Attribute columns published as feature properties, in output order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Corridors2d => CORRIDORS_2D_COLUMNS,
            DatasetKind::Network3d => NETWORK_3D_COLUMNS,
            DatasetKind::HdbFootprints => HDB_FOOTPRINTS_COLUMNS,
        }
    }

    /// File name of the whole-dataset GeoJSON export.
    pub fn default_file_name(self) -> &'static str {
        match self {
            DatasetKind::Corridors2d => "2D_safe_corridors_prioritized.geojson",
            DatasetKind::Network3d => "3D_merged_network.geojson",
            DatasetKind::HdbFootprints => "hdb_footprints.geojson",
        }
    }

    /// URL slug, also the `Display` form.
    pub fn slug(self) -> &'static str {
        match self {
            DatasetKind::Corridors2d => "2d-corridors",
            DatasetKind::Network3d => "3d-network",
            DatasetKind::HdbFootprints => "hdb-footprints",
        }
    }

    /// Route path of the dataset endpoint.
    pub fn route(self) -> String {
        format!("/{}", self.slug())
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset '{0}' (expected one of 2d-corridors, 3d-network, hdb-footprints)")]
pub struct UnknownDataset(pub String);

impl FromStr for DatasetKind {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| UnknownDataset(s.to_string()))
    }
}
