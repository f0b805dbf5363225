/// LevelWater service binary.
///
/// Startup sequence: load `.env`, read the TOML config, initialize the
/// logger, open the store (PostgreSQL when a database URL is configured,
/// a seeded in-memory store otherwise), then serve the HTTP API and
/// dashboard until terminated.

use std::error::Error;

use postgres::{Client, NoTls};
use tokio::net::TcpListener;

use levelwater_service::api::{self, AppState};
use levelwater_service::config::Config;
use levelwater_service::dev_mode;
use levelwater_service::logging::{self, LogLevel, Subsystem};
use levelwater_service::store::{MemoryRiverStore, PgRiverStore, RiverStore};

const CONFIG_PATH: &str = "config.toml";

fn open_store(config: &Config) -> Result<Box<dyn RiverStore>, Box<dyn Error>> {
    match &config.database_url {
        Some(url) => {
            let client = Client::connect(url, NoTls)?;
            let mut store = PgRiverStore::new(client);
            store.init_schema()?;
            logging::info(Subsystem::Store, None, "connected to PostgreSQL");
            Ok(Box::new(store))
        }
        None => {
            let mut store = MemoryRiverStore::new();
            let seeded = dev_mode::seed(&mut store)?;
            logging::warn(
                Subsystem::System,
                None,
                &format!(
                    "no database configured — dev mode with {} seeded rivers",
                    seeded
                ),
            );
            Ok(Box::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let config = Config::load(CONFIG_PATH)?;
    logging::init_logger(
        LogLevel::from_config(&config.log_level),
        config.log_file.as_deref(),
    );
    logging::info(
        Subsystem::System,
        None,
        &format!("starting levelwater_service on {}", config.bind_addr()),
    );

    let store = open_store(&config)?;
    let state = AppState::new(store);
    let router = api::build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    logging::info(Subsystem::Http, None, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
