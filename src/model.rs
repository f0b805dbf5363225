/// Core data types for the LevelWater monitoring service.
///
/// This module defines the shared domain model imported by all other modules:
/// the River → Station → Measurement document hierarchy as it is persisted in
/// the store, the `LatestView` projection served to the dashboard, and the
/// service-level error taxonomy.
///
/// Ownership is strictly hierarchical — a River owns its Stations, a Station
/// owns its Measurements. There are no back-references and nothing is ever
/// deleted; measurements are append-only once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::thresholds::Severity;
use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// A river and the full set of monitoring stations along it.
///
/// One River is one document in the store. `name` is the lookup key used by
/// every operation; uniqueness is assumed but never enforced, so lookups use
/// first-match semantics when duplicates exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct River {
    /// Opaque stable identifier assigned by the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// A water-level monitoring point on a river, identified by city.
///
/// `warning_level` and `alarm_level` are two ascending thresholds used for
/// severity classification. The ordering `alarm_level >= warning_level` is
/// assumed, not validated. A station missing either coordinate is simply
/// excluded from map rendering, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Small integer identifier. Uniqueness is not enforced across rivers.
    pub id: i32,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub warning_level: f64,
    pub alarm_level: f64,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

/// A single timestamped water-level reading. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub date_time: DateTime<Utc>,
    pub water_level: f64,
}

// ---------------------------------------------------------------------------
// Latest-reading projection
// ---------------------------------------------------------------------------

/// The most recent measurement of one station, joined with the owning
/// river's name and the station's metadata.
///
/// Produced by `analysis::latest::latest_per_station` and consumed by the
/// dashboard, which colors table cells and map markers by `severity`.
/// Field names are camelCase on the wire (`riverName`,
/// `measurementDateTime`, `measurementWaterLevel`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestView {
    /// Station id, carried through for marker identity on the map.
    pub id: i32,
    pub river_name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub warning_level: f64,
    pub alarm_level: f64,
    pub measurement_date_time: DateTime<Utc>,
    pub measurement_water_level: f64,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by the aggregation and mutation engines.
///
/// The NotFound variants are fail-fast lookup failures — no retry, no
/// auto-create — and must stay distinguishable from a store failure at the
/// API boundary (404 vs 503).
#[derive(Debug)]
pub enum ServiceError {
    /// No river with the given name exists.
    RiverNotFound(String),
    /// The river exists but has no station in the given city.
    StationNotFound { river: String, city: String },
    /// No station in any river matches the given city.
    CityNotFound(String),
    /// The store adapter failed; propagated opaquely, not interpreted.
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::RiverNotFound(name) => write!(f, "River '{}' not found", name),
            ServiceError::StationNotFound { river, city } => {
                write!(f, "Station in city '{}' not found on river '{}'", city, river)
            }
            ServiceError::CityNotFound(city) => {
                write!(f, "No stations in city '{}'", city)
            }
            ServiceError::Store(err) => write!(f, "Store error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl ServiceError {
    /// True for the fail-fast lookup failures, false for store failures.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, ServiceError::Store(_))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
