/// Measurement history views.
///
/// Two variants over already-fetched River documents:
/// - exact station: river by name, then station by city within it;
/// - cross-river city: every station in that city across all rivers,
///   merged into one timestamp-ordered sequence.
///
/// Both return sorted copies — stored measurement order is append order,
/// which is not necessarily chronological (backfills append late), so
/// reads re-sort rather than trusting it.

use crate::model::{Measurement, River, ServiceError};

/// Ordered measurement history for one exact station.
///
/// The river is looked up by name and the station by city, first match
/// each (duplicate names/cities are accepted-but-unchecked input). Fails
/// with `RiverNotFound` / `StationNotFound` when either lookup misses.
pub fn history_for_station(
    rivers: &[River],
    river_name: &str,
    city: &str,
) -> Result<Vec<Measurement>, ServiceError> {
    let river = rivers
        .iter()
        .find(|r| r.name == river_name)
        .ok_or_else(|| ServiceError::RiverNotFound(river_name.to_string()))?;
    let station = river
        .stations
        .iter()
        .find(|s| s.city == city)
        .ok_or_else(|| ServiceError::StationNotFound {
            river: river_name.to_string(),
            city: city.to_string(),
        })?;

    let mut history = station.measurements.clone();
    history.sort_by_key(|m| m.date_time);
    Ok(history)
}

/// Merged measurement history for every station in a city, across rivers.
///
/// Measurements from different stations are interleaved purely by
/// timestamp, not grouped per station. Fails with `CityNotFound` when no
/// station anywhere matches the city.
pub fn history_for_city(rivers: &[River], city: &str) -> Result<Vec<Measurement>, ServiceError> {
    let stations: Vec<_> = rivers
        .iter()
        .flat_map(|r| r.stations.iter())
        .filter(|s| s.city == city)
        .collect();
    if stations.is_empty() {
        return Err(ServiceError::CityNotFound(city.to_string()));
    }

    let mut history: Vec<Measurement> = stations
        .into_iter()
        .flat_map(|s| s.measurements.iter().cloned())
        .collect();
    history.sort_by_key(|m| m.date_time);
    Ok(history)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Station;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn measurement(hour: u32, level: f64) -> Measurement {
        Measurement {
            date_time: at(hour),
            water_level: level,
        }
    }

    fn station(city: &str, measurements: Vec<Measurement>) -> Station {
        Station {
            id: 1,
            city: city.to_string(),
            latitude: None,
            longitude: None,
            warning_level: 300.0,
            alarm_level: 400.0,
            measurements,
        }
    }

    fn river(name: &str, stations: Vec<Station>) -> River {
        River {
            id: None,
            name: name.to_string(),
            stations,
        }
    }

    #[test]
    fn test_station_history_is_sorted_ascending_regardless_of_stored_order() {
        let rivers = vec![river(
            "San",
            vec![station(
                "Przemyśl",
                vec![
                    measurement(12, 310.0),
                    measurement(8, 240.0),
                    measurement(10, 260.0),
                ],
            )],
        )];
        let history = history_for_station(&rivers, "San", "Przemyśl").unwrap();
        let hours: Vec<_> = history.iter().map(|m| m.date_time).collect();
        assert_eq!(hours, vec![at(8), at(10), at(12)]);
    }

    #[test]
    fn test_station_history_does_not_mutate_stored_order() {
        let rivers = vec![river(
            "San",
            vec![station("Przemyśl", vec![measurement(12, 310.0), measurement(8, 240.0)])],
        )];
        let _ = history_for_station(&rivers, "San", "Przemyśl").unwrap();
        // The sort happens on a copy; the document keeps append order.
        assert_eq!(rivers[0].stations[0].measurements[0].date_time, at(12));
    }

    #[test]
    fn test_unknown_river_fails_with_river_not_found() {
        let rivers = vec![river("San", vec![station("Przemyśl", vec![])])];
        let err = history_for_station(&rivers, "Odra", "Przemyśl").unwrap_err();
        assert!(matches!(err, ServiceError::RiverNotFound(name) if name == "Odra"));
    }

    #[test]
    fn test_unknown_city_on_known_river_fails_with_station_not_found() {
        let rivers = vec![river("San", vec![station("Przemyśl", vec![])])];
        let err = history_for_station(&rivers, "San", "Sanok").unwrap_err();
        assert!(matches!(
            err,
            ServiceError::StationNotFound { river, city } if river == "San" && city == "Sanok"
        ));
    }

    #[test]
    fn test_duplicate_river_names_resolve_to_first_match() {
        let rivers = vec![
            river("San", vec![station("Przemyśl", vec![measurement(8, 111.0)])]),
            river("San", vec![station("Przemyśl", vec![measurement(8, 222.0)])]),
        ];
        let history = history_for_station(&rivers, "San", "Przemyśl").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].water_level, 111.0);
    }

    #[test]
    fn test_city_history_interleaves_stations_across_rivers_by_timestamp() {
        // Two rivers both have a station in Rzeszów; the merged history
        // alternates between them chronologically, not grouped.
        let rivers = vec![
            river(
                "Wisłok",
                vec![station("Rzeszów", vec![measurement(8, 100.0), measurement(12, 140.0)])],
            ),
            river(
                "San",
                vec![station("Rzeszów", vec![measurement(10, 200.0), measurement(14, 240.0)])],
            ),
        ];
        let history = history_for_city(&rivers, "Rzeszów").unwrap();
        let levels: Vec<_> = history.iter().map(|m| m.water_level).collect();
        assert_eq!(levels, vec![100.0, 200.0, 140.0, 240.0]);
    }

    #[test]
    fn test_city_history_ignores_stations_in_other_cities() {
        let rivers = vec![river(
            "San",
            vec![
                station("Przemyśl", vec![measurement(8, 250.0)]),
                station("Sanok", vec![measurement(9, 180.0)]),
            ],
        )];
        let history = history_for_city(&rivers, "Sanok").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].water_level, 180.0);
    }

    #[test]
    fn test_city_with_no_stations_fails_with_city_not_found() {
        let rivers = vec![river("San", vec![station("Przemyśl", vec![])])];
        let err = history_for_city(&rivers, "Kraków").unwrap_err();
        assert!(matches!(err, ServiceError::CityNotFound(city) if city == "Kraków"));
    }

    #[test]
    fn test_city_with_station_but_no_measurements_returns_empty_history() {
        // A matching station with nothing recorded is an empty result,
        // not a NotFound.
        let rivers = vec![river("San", vec![station("Przemyśl", vec![])])];
        let history = history_for_city(&rivers, "Przemyśl").unwrap();
        assert!(history.is_empty());
    }
}
