/// Aggregation engine for the LevelWater service.
///
/// Pure, synchronous transforms over River documents that have already
/// been fetched from the store — no I/O happens below this module.
///
/// Submodules:
/// - `latest` — the most recent measurement per station, classified
///   against the station's thresholds, for the dashboard table and map.
/// - `history` — ordered measurement history for an exact station, and
///   the cross-river merged history for a city.

pub mod history;
pub mod latest;
