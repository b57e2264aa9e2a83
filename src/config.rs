//! Destination database configuration
//!
//! Connection parameters are read once at startup from the process
//! environment (optionally seeded from an env file) and passed by
//! reference to the database engine.

use crate::error::{Error, Result};
use std::path::Path;

/// Environment variable holding the database user
pub const ENV_DB_USER: &str = "DB_USER";
/// Environment variable holding the database password
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
/// Environment variable holding the database host
pub const ENV_DB_HOST: &str = "DB_HOST";
/// Environment variable holding the database port
pub const ENV_DB_PORT: &str = "DB_PORT";
/// Environment variable holding the database name
pub const ENV_DB_NAME: &str = "DB_NAME";

/// Schema the loaded tables are created in
pub const DEFAULT_SCHEMA: &str = "data";

/// PostgreSQL connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Login role
    pub user: String,
    /// Login password
    pub password: String,
    /// Server host name or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database name
    pub database: String,
}

impl DatabaseConfig {
    /// Build the config from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup
    ///
    /// Every parameter is required; an unset or blank value is reported by
    /// its variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::missing_field(key))
        };

        let user = require(ENV_DB_USER)?;
        let password = require(ENV_DB_PASSWORD)?;
        let host = require(ENV_DB_HOST)?;
        let port_raw = require(ENV_DB_PORT)?;
        let database = require(ENV_DB_NAME)?;

        let port = port_raw.trim().parse::<u16>().map_err(|e| {
            Error::invalid_value(ENV_DB_PORT, format!("'{port_raw}' is not a valid port: {e}"))
        })?;

        Ok(Self {
            user,
            password,
            host,
            port,
            database,
        })
    }

    /// libpq keyword/value connection string
    ///
    /// Values are single-quoted so passwords may contain any character.
    pub fn dsn(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_dsn_value(&self.host),
            self.port,
            quote_dsn_value(&self.database),
            quote_dsn_value(&self.user),
            quote_dsn_value(&self.password)
        )
    }

    /// Connection URI with the password masked, for logging
    pub fn connection_info(&self) -> String {
        format!(
            "postgresql://{}:****@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"****")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

fn quote_dsn_value(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Load variables from an env file into the process environment
///
/// Variables already set in the environment win. A missing file is not an
/// error; returns whether the file was found.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No env file at {}", path.display());
        return Ok(false);
    }

    dotenvy::from_path(path)?;
    tracing::debug!("Loaded env file {}", path.display());
    Ok(true)
}
