//! Service configuration, resolved from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `API_BASE_URL` | unset; wins over host/port when present |
//! | `BACKEND_HOST` / `BACKEND_PORT` | `localhost` / `8080` |
//! | `UPSTREAM_TIMEOUT_MS` | `5000` |
//! | `DATABASE_URL` | `sqlite://data/smorfia.db?mode=rwc` |
//! | `DATABASE_POOL_SIZE` | `5` |
//! | `SMORFIA_BIND_ADDR` | `0.0.0.0:3000` |
//! | `SMORFIA_SEED_FILE` | `data/smorfia_napoletana.json` |
//! | `MEANING_STORE` | `sqlite`; `file` serves the seed file from memory |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Result, SmorfiaError};

pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/smorfia.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SEED_FILE: &str = "data/smorfia_napoletana.json";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_SIZE: u32 = 5;

/// Where the upstream draw service lives and how long we wait for it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }

    /// Resolve from an arbitrary key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = match lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => match (lookup("BACKEND_HOST"), lookup("BACKEND_PORT")) {
                (None, None) => DEFAULT_UPSTREAM_URL.to_string(),
                (host, port) => format!(
                    "http://{}:{}",
                    host.unwrap_or_else(|| "localhost".into()),
                    port.unwrap_or_else(|| "8080".into())
                ),
            },
        };
        let base_url = Url::parse(raw.trim())
            .map_err(|e| SmorfiaError::Config(format!("invalid upstream URL {raw:?}: {e}")))?;

        let timeout_ms = match lookup("UPSTREAM_TIMEOUT_MS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| SmorfiaError::Config(format!("UPSTREAM_TIMEOUT_MS={v:?}: {e}")))?,
            None => DEFAULT_UPSTREAM_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

/// Which medium holds the meaning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMedium {
    /// Relational table reached through `DATABASE_URL`.
    #[default]
    Sqlite,
    /// The seed file, loaded once into memory at startup.
    File,
}

impl StoreMedium {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "sqlite" => Ok(Self::Sqlite),
            "file" | "memory" => Ok(Self::File),
            other => Err(SmorfiaError::Config(format!(
                "MEANING_STORE={other:?}: expected \"sqlite\" or \"file\""
            ))),
        }
    }
}

/// Meaning-store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: lookup("DATABASE_POOL_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_POOL_SIZE),
            connection_timeout: Duration::from_secs(10),
        }
    }

    /// In-memory SQLite, one connection so every query sees the same database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Everything the server binary needs.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub store: StoreMedium,
    pub upstream: UpstreamConfig,
    pub database: DatabaseConfig,
    pub seed_file: PathBuf,
}

impl ServiceConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            bind_addr: lookup("SMORFIA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            store: match lookup("MEANING_STORE") {
                Some(raw) => StoreMedium::parse(&raw)?,
                None => StoreMedium::default(),
            },
            upstream: UpstreamConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup),
            seed_file: lookup("SMORFIA_SEED_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE)),
        })
    }
}
