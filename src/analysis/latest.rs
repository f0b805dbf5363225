/// Latest-measurement projection.
///
/// For every station of every river, selects the single most recent
/// measurement by timestamp and joins it with the station metadata the
/// dashboard needs. Stations that have recorded nothing yet are skipped —
/// no entry, not an error.

use crate::alert::thresholds::classify;
use crate::model::{LatestView, River};

/// Computes the latest reading per station across all rivers.
///
/// Output order follows input traversal order (river, then station within
/// the river) — not river name and not severity. Callers that want the
/// name-sorted order rely on the store returning rivers sorted by name.
///
/// On equal timestamps the winner is unspecified (storage-order
/// dependent); measurement timestamps are expected to be distinct per
/// station in practice.
pub fn latest_per_station(rivers: &[River]) -> Vec<LatestView> {
    let mut views = Vec::new();
    for river in rivers {
        for station in &river.stations {
            let latest = station
                .measurements
                .iter()
                .max_by_key(|m| m.date_time);
            let Some(measurement) = latest else {
                continue; // station has no measurements yet
            };
            views.push(LatestView {
                id: station.id,
                river_name: river.name.clone(),
                city: station.city.clone(),
                latitude: station.latitude,
                longitude: station.longitude,
                warning_level: station.warning_level,
                alarm_level: station.alarm_level,
                measurement_date_time: measurement.date_time,
                measurement_water_level: measurement.water_level,
                severity: classify(
                    measurement.water_level,
                    station.warning_level,
                    station.alarm_level,
                ),
            });
        }
    }
    views
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
