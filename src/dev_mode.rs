/// Development mode seed data.
///
/// When no database is configured the service runs on an in-memory store
/// seeded with sample rivers, so the dashboard and API are fully
/// exercisable without provisioning. The sample set covers the corner
/// cases the engines care about: readings in every severity tier, a
/// station without coordinates, a station with no measurements yet, and
/// two rivers sharing a station city.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Measurement, River, Station};
use crate::store::{RiverStore, StoreError};

fn readings(now: DateTime<Utc>, levels: &[f64]) -> Vec<Measurement> {
    // One reading per hour, newest last.
    levels
        .iter()
        .enumerate()
        .map(|(i, &water_level)| Measurement {
            date_time: now - Duration::hours((levels.len() - 1 - i) as i64),
            water_level,
        })
        .collect()
}

/// The sample rivers seeded in dev mode, timestamped relative to `now`.
pub fn sample_rivers(now: DateTime<Utc>) -> Vec<River> {
    vec![
        River {
            id: None,
            name: "San".to_string(),
            stations: vec![
                Station {
                    id: 1,
                    city: "Przemyśl".to_string(),
                    latitude: Some(49.7838),
                    longitude: Some(22.7678),
                    warning_level: 300.0,
                    alarm_level: 400.0,
                    measurements: readings(now, &[250.0, 280.0, 320.0, 410.0]),
                },
                Station {
                    id: 2,
                    city: "Sanok".to_string(),
                    latitude: Some(49.5557),
                    longitude: Some(22.2056),
                    warning_level: 220.0,
                    alarm_level: 280.0,
                    measurements: readings(now, &[140.0, 150.0, 145.0]),
                },
            ],
        },
        River {
            id: None,
            name: "Wisłok".to_string(),
            stations: vec![
                Station {
                    id: 3,
                    city: "Rzeszów".to_string(),
                    latitude: Some(50.0412),
                    longitude: Some(21.9991),
                    warning_level: 240.0,
                    alarm_level: 320.0,
                    measurements: readings(now, &[200.0, 230.0, 260.0]),
                },
                Station {
                    id: 4,
                    city: "Krosno".to_string(),
                    // No coordinates on record — excluded from the map,
                    // still present in the table.
                    latitude: None,
                    longitude: None,
                    warning_level: 180.0,
                    alarm_level: 240.0,
                    measurements: readings(now, &[120.0, 135.0]),
                },
            ],
        },
        River {
            id: None,
            name: "Wisła".to_string(),
            stations: vec![
                Station {
                    id: 5,
                    city: "Kraków".to_string(),
                    latitude: Some(50.0647),
                    longitude: Some(19.9450),
                    warning_level: 520.0,
                    alarm_level: 620.0,
                    measurements: readings(now, &[430.0, 470.0, 510.0]),
                },
                Station {
                    id: 6,
                    city: "Rzeszów".to_string(),
                    // Same city as the Wisłok station, on purpose — the
                    // cross-river city history merges both.
                    latitude: Some(50.0300),
                    longitude: Some(22.0100),
                    warning_level: 300.0,
                    alarm_level: 380.0,
                    measurements: readings(now, &[210.0, 240.0]),
                },
                Station {
                    id: 7,
                    city: "Warszawa".to_string(),
                    latitude: Some(52.2297),
                    longitude: Some(21.0122),
                    warning_level: 600.0,
                    alarm_level: 650.0,
                    measurements: Vec::new(), // newly provisioned, nothing recorded yet
                },
            ],
        },
    ]
}

/// Seeds the sample rivers into an empty store.
///
/// Returns the number of rivers inserted; a store that already holds any
/// river is left untouched (seeding never overwrites real data).
pub fn seed(store: &mut dyn RiverStore) -> Result<usize, StoreError> {
    if !store.find_all()?.is_empty() {
        return Ok(0);
    }
    let mut rivers = sample_rivers(Utc::now());
    store.insert_many(&mut rivers)?;
    Ok(rivers.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
