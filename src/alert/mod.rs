/// Severity classification for water-level readings.
///
/// Submodules:
/// - `thresholds` — the three-tier (normal/warning/alarm) classification
///   of a reading against a station's stored thresholds.

pub mod thresholds;
