/// HTTP surface for the LevelWater service.
///
/// Thin axum handlers over the aggregation and mutation engines. Each
/// handler deserializes the request, runs one store round trip plus a pure
/// engine call on the blocking pool, and serializes the response. Error
/// mapping keeps NotFound (404) distinguishable from a store failure
/// (503).
///
/// # Endpoints
///
/// | Method | Path | Description |
/// |--------|------|-------------|
/// | `GET`  | `/stationinfo/latest` | Latest reading per station, classified |
/// | `GET`  | `/api/rivers` | All rivers, sorted by name |
/// | `POST` | `/api/rivers` | Bulk river upload |
/// | `POST` | `/api/stations/{river_name}` | Append a station to a river |
/// | `POST` | `/api/measurements/{river_name}/{city}` | Append a measurement |
/// | `GET`  | `/api/waterhistory/{river_name}/{city}` | Exact-station history |
/// | `GET`  | `/waterhistory/{city}` | Cross-river city history |
///
/// The dashboard (`static/index.html`) is served as the fallback.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::analysis::{history, latest};
use crate::logging::{self, Subsystem};
use crate::model::{LatestView, Measurement, River, ServiceError, Station};
use crate::mutation;
use crate::store::RiverStore;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Process-lifetime handle to the document store.
///
/// The store is constructed once at startup and shared across handlers.
/// The mutex serializes access to the single connection — it does NOT
/// serialize logical read-modify-replace sequences, so the lost-update
/// race documented in `store` still exists across requests.
pub struct AppState {
    store: Mutex<Box<dyn RiverStore>>,
}

impl AppState {
    pub fn new(store: Box<dyn RiverStore>) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
        })
    }
}

/// Runs a store-touching closure on the blocking pool.
async fn with_store<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut dyn RiverStore) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = state
            .store
            .lock()
            .map_err(|_| ApiError::Internal("store handle poisoned".to_string()))?;
        f(guard.as_mut()).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("blocking task failed: {}", e)))?
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// HTTP-boundary error, converted into a JSON error response.
#[derive(Debug)]
pub enum ApiError {
    /// Named entity absent → 404.
    NotFound(String),
    /// Store adapter failed → 503, distinguishable from NotFound.
    StoreUnavailable(String),
    /// Anything else → 500.
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(store_err) => {
                logging::error(Subsystem::Store, None, &store_err.to_string());
                ApiError::StoreUnavailable(store_err.to_string())
            }
            not_found => ApiError::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /stationinfo/latest` — drives both the dashboard table and map.
async fn get_latest(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LatestView>>, ApiError> {
    let views = with_store(state, |store| {
        let rivers = store.find_all()?;
        Ok(latest::latest_per_station(&rivers))
    })
    .await?;
    Ok(Json(views))
}

/// `GET /api/rivers` — the full collection, sorted by name.
async fn get_rivers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<River>>, ApiError> {
    let rivers = with_store(state, |store| Ok(store.find_all()?)).await?;
    Ok(Json(rivers))
}

/// `POST /api/rivers` — bulk upload from a provisioning source.
async fn upload_rivers(
    State(state): State<Arc<AppState>>,
    Json(rivers): Json<Vec<River>>,
) -> Result<Json<Vec<River>>, ApiError> {
    let count = rivers.len();
    let inserted = with_store(state, move |store| {
        let mut rivers = rivers;
        store.insert_many(&mut rivers)?;
        Ok(rivers)
    })
    .await?;
    logging::info(Subsystem::Http, None, &format!("uploaded {} rivers", count));
    Ok(Json(inserted))
}

/// `POST /api/stations/{river_name}` — append a station, return the
/// updated river.
async fn add_station(
    State(state): State<Arc<AppState>>,
    Path(river_name): Path<String>,
    Json(station): Json<Station>,
) -> Result<Json<River>, ApiError> {
    let city = station.city.clone();
    let log_name = river_name.clone();
    let river = with_store(state, move |store| {
        mutation::add_station(store, &river_name, station)
    })
    .await?;
    logging::info(
        Subsystem::Http,
        Some(&log_name),
        &format!("added station in '{}'", city),
    );
    Ok(Json(river))
}

/// `POST /api/measurements/{river_name}/{city}` — append a measurement.
async fn add_measurement(
    State(state): State<Arc<AppState>>,
    Path((river_name, city)): Path<(String, String)>,
    Json(measurement): Json<Measurement>,
) -> Result<StatusCode, ApiError> {
    let log_context = format!("{}/{}", river_name, city);
    with_store(state, move |store| {
        mutation::add_measurement(store, &river_name, &city, measurement)
    })
    .await?;
    logging::info(Subsystem::Http, Some(&log_context), "added measurement");
    Ok(StatusCode::OK)
}

/// `GET /api/waterhistory/{river_name}/{city}` — exact-station history,
/// sorted ascending by timestamp.
async fn station_history(
    State(state): State<Arc<AppState>>,
    Path((river_name, city)): Path<(String, String)>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let measurements = with_store(state, move |store| {
        let rivers = store.find_all()?;
        history::history_for_station(&rivers, &river_name, &city)
    })
    .await?;
    Ok(Json(measurements))
}

/// `GET /waterhistory/{city}` — merged history for every station in the
/// city across all rivers.
async fn city_history(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let measurements = with_store(state, move |store| {
        let rivers = store.find_all()?;
        history::history_for_city(&rivers, &city)
    })
    .await?;
    Ok(Json(measurements))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the complete router: API routes, permissive CORS for the
/// dashboard, and the static dashboard itself as the fallback.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stationinfo/latest", get(get_latest))
        .route("/api/rivers", get(get_rivers).post(upload_rivers))
        .route("/api/stations/{river_name}", post(add_station))
        .route("/api/measurements/{river_name}/{city}", post(add_measurement))
        .route("/api/waterhistory/{river_name}/{city}", get(station_history))
        .route("/waterhistory/{city}", get(city_history))
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
