/// LevelWater — river water-level monitoring service.
///
/// River documents (stations embedding measurements) live in a single
/// collection of a document store. The crate splits into:
///
/// - `model` — the shared domain types and error taxonomy.
/// - `store` — the document store adapter (PostgreSQL JSONB or in-memory).
/// - `analysis` — pure aggregation: latest reading per station, ordered
///   measurement history per station and per city.
/// - `alert` — severity classification against per-station thresholds.
/// - `mutation` — nested appends via whole-document read-modify-replace.
/// - `api` — the axum HTTP surface and static dashboard.
/// - `config`, `logging`, `dev_mode` — service plumbing and seed data.

pub mod alert;
pub mod analysis;
pub mod api;
pub mod config;
pub mod dev_mode;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod store;
