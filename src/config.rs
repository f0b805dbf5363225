/// Service configuration.
///
/// Settings come from a TOML file (default `config.toml`) with environment
/// overrides on top; `.env` files are loaded by `main` via dotenv before
/// this module reads the environment. A missing config file is not an
/// error — the service falls back to defaults, which means dev mode
/// (in-memory seeded store) on port 7204.

use serde::Deserialize;
use std::path::Path;

/// Default bind port, matching the original deployment of this service.
const DEFAULT_PORT: u16 = 7204;

// ---------------------------------------------------------------------------
// Config file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    database: DatabaseSection,
    server: ServerSection,
    logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DatabaseSection {
    /// PostgreSQL connection string. Absent → dev mode (in-memory store).
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ServerSection {
    host: String,
    port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: String,
    file: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved service configuration (file + environment).
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string; `None` runs the seeded in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_file: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Loads configuration from `path`, then applies environment overrides.
    ///
    /// A missing file yields defaults; a present-but-malformed file is an
    /// error (silently ignoring a broken config hides misdeployment).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let file = if Path::new(path).exists() {
            let raw = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&raw).map_err(ConfigError::Parse)?
        } else {
            ConfigFile::default()
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merges the parsed file with environment overrides.
    ///
    /// `DATABASE_URL` overrides `[database].url`; `LEVELWATER_PORT` and
    /// `LEVELWATER_HOST` override the bind address.
    fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = env("DATABASE_URL").or(file.database.url);
        let host = env("LEVELWATER_HOST").unwrap_or(file.server.host);
        let port = env("LEVELWATER_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(file.server.port);

        Config {
            database_url,
            host,
            port,
            log_level: file.logging.level,
            log_file: file.logging.file,
        }
    }

    /// True when no database is configured and the service should run on
    /// the seeded in-memory store.
    pub fn dev_mode(&self) -> bool {
        self.database_url.is_none()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
