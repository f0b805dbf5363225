//! Live checks against a running LevelWater instance.
//!
//! These hit a locally running service over real HTTP, so they are marked
//! `#[ignore]` and don't run during normal CI builds. Start the service
//! (dev mode is enough: `cargo run`), then:
//!
//!   cargo test -- --ignored live_api
//!
//! The base URL can be overridden with LEVELWATER_BASE_URL.

use serde_json::Value;

fn base_url() -> String {
    std::env::var("LEVELWATER_BASE_URL").unwrap_or_else(|_| "http://localhost:7204".to_string())
}

fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap()
}

#[test]
#[ignore] // Requires a running instance
fn live_api_latest_measurements_have_the_dashboard_shape() {
    let response = client()
        .get(format!("{}/stationinfo/latest", base_url()))
        .send()
        .expect("service should be reachable");
    assert!(response.status().is_success());

    let views: Vec<Value> = response.json().unwrap();
    assert!(!views.is_empty(), "dev mode seeds stations with readings");
    for view in &views {
        assert!(view["riverName"].is_string());
        assert!(view["city"].is_string());
        assert!(view["measurementWaterLevel"].is_number());
        let severity = view["severity"].as_str().unwrap();
        assert!(
            ["normal", "warning", "alarm"].contains(&severity),
            "unexpected severity '{}'",
            severity
        );
    }
}

#[test]
#[ignore] // Requires a running instance
fn live_api_rivers_are_sorted_by_name() {
    let response = client()
        .get(format!("{}/api/rivers", base_url()))
        .send()
        .expect("service should be reachable");
    assert!(response.status().is_success());

    let rivers: Vec<Value> = response.json().unwrap();
    let names: Vec<&str> = rivers.iter().map(|r| r["name"].as_str().unwrap()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted, "find_all must return name-ascending order");
}

#[test]
#[ignore] // Requires a running instance
fn live_api_unknown_river_yields_404_with_json_error() {
    let response = client()
        .post(format!("{}/api/measurements/NoSuchRiver/Nowhere", base_url()))
        .json(&serde_json::json!({
            "dateTime": "2024-05-01T10:00:00Z",
            "waterLevel": 100.0
        }))
        .send()
        .expect("service should be reachable");
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().unwrap();
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("NoSuchRiver"));
}

#[test]
#[ignore] // Requires a running instance
fn live_api_dashboard_page_is_served() {
    let response = client()
        .get(format!("{}/", base_url()))
        .send()
        .expect("service should be reachable");
    assert!(response.status().is_success());
    let page = response.text().unwrap();
    assert!(page.contains("River Water Levels"));
}
