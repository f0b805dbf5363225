/// Mutation engine: appends into the nested River document.
///
/// Every mutation is a read-modify-replace round trip — fetch the river by
/// name, mutate the in-memory copy, replace the whole document keyed on its
/// id. There is no partial update and no concurrency token; two concurrent
/// mutations under the same river race, and the second replace wins (see
/// the lost-update note in `store`). Lookups fail fast with NotFound and
/// leave the store untouched — no auto-create, no retry.

use crate::model::{Measurement, River, ServiceError, Station};
use crate::store::RiverStore;

/// Appends a station to the named river and returns the updated river.
///
/// No uniqueness check on the station's city or id — duplicates are
/// accepted, and later city lookups resolve to the first match.
pub fn add_station(
    store: &mut dyn RiverStore,
    river_name: &str,
    station: Station,
) -> Result<River, ServiceError> {
    let mut river = store
        .find_by_name(river_name)?
        .ok_or_else(|| ServiceError::RiverNotFound(river_name.to_string()))?;

    river.stations.push(station);
    store.replace_by_id(&river)?;
    Ok(river)
}

/// Appends a measurement to the station in `city` on the named river.
///
/// Append order is not enforced to be chronological — a backfilled
/// measurement with an earlier timestamp lands at the end of the stored
/// list, and history reads re-sort. The persisted list is append order,
/// not a time-ordered log.
pub fn add_measurement(
    store: &mut dyn RiverStore,
    river_name: &str,
    city: &str,
    measurement: Measurement,
) -> Result<(), ServiceError> {
    let mut river = store
        .find_by_name(river_name)?
        .ok_or_else(|| ServiceError::RiverNotFound(river_name.to_string()))?;

    let station = river
        .stations
        .iter_mut()
        .find(|s| s.city == city)
        .ok_or_else(|| ServiceError::StationNotFound {
            river: river_name.to_string(),
            city: city.to_string(),
        })?;

    station.measurements.push(measurement);
    store.replace_by_id(&river)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
