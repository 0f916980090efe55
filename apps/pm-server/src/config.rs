//! Server configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Which repository backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through a connection pool.
    Postgres,
    /// Process-local maps; data is lost on exit.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown PM_STORAGE value: {other:?} (expected postgres or memory)"),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Repository backend.
    pub storage: StorageBackend,
    /// Database URL.
    pub database_url: String,
    /// Connection pool size.
    pub db_max_connections: u32,
    /// Deployment environment reported by `/health`.
    pub environment: String,
    /// Log level.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            storage: StorageBackend::Postgres,
            database_url: "postgres://postgres:@localhost:5432/postgres?sslmode=disable"
                .to_string(),
            db_max_connections: 5,
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let storage = match var("PM_STORAGE") {
            Some(value) => value.parse()?,
            None => defaults.storage,
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| database_url_from_parts(&var));

        Ok(Self {
            host: var("PM_SERVER_HOST").unwrap_or(defaults.host),
            port: var("PM_SERVER_PORT")
                .or_else(|| var("PORT"))
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            storage,
            database_url,
            db_max_connections: var("PM_DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db_max_connections),
            environment: var("PM_ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: var("PM_LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Assembles a Postgres URL from the discrete `DB_*` variables.
fn database_url_from_parts(var: &impl Fn(&str) -> Option<String>) -> String {
    let host = var("DB_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = var("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let user = var("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let password = var("DB_PASSWORD").unwrap_or_default();
    let name = var("DB_NAME").unwrap_or_else(|| "postgres".to_string());

    format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
        host,
        port,
        name
    )
}
