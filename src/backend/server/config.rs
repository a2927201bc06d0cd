/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 * 1. Built-in defaults suitable for local development
 * 2. A TOML file named by `MESSENGER_CONFIG` (optional)
 * 3. Environment variables (`.env` is loaded first by `ServerConfig::load`)
 *
 * | Variable             | Default                         |
 * |----------------------|---------------------------------|
 * | `DATABASE_URL`       | `sqlite://messenger.db?mode=rwc` |
 * | `JWT_SECRET`         | development secret (warned)     |
 * | `TOKEN_TTL_HOURS`    | 24                              |
 * | `SERVER_HOST`        | 0.0.0.0                         |
 * | `SERVER_PORT`        | 3001                            |
 * | `DB_MAX_CONNECTIONS` | 5                               |
 * | `BCRYPT_COST`        | bcrypt default (12)             |
 */

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Secret used when `JWT_SECRET` is not configured
pub const DEV_JWT_SECRET: &str = "messenger-development-secret-change-me";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Runtime configuration for the server
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://messenger.db?mode=rwc".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            host: "0.0.0.0".to_string(),
            port: 3001,
            db_max_connections: 5,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, the optional TOML file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var("MESSENGER_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;

        if config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set. Using the development secret; do not run like this in production.");
        }

        Ok(config)
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = get("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(host) = get("SERVER_HOST") {
            self.host = host;
        }
        if let Some(value) = get("TOKEN_TTL_HOURS") {
            self.token_ttl_hours = parse_value("TOKEN_TTL_HOURS", value)?;
        }
        if let Some(value) = get("SERVER_PORT") {
            self.port = parse_value("SERVER_PORT", value)?;
        }
        if let Some(value) = get("DB_MAX_CONNECTIONS") {
            self.db_max_connections = parse_value("DB_MAX_CONNECTIONS", value)?;
        }
        if let Some(value) = get("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("BCRYPT_COST", value)?;
        }
        Ok(())
    }

    /// Configuration for an isolated in-memory instance
    ///
    /// Uses the cheapest bcrypt cost so hashing stays fast.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "in-memory-test-secret".to_string(),
            bcrypt_cost: 4,
            ..Self::default()
        }
    }

    /// Address the server listens on
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

fn parse_value<T: FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Open the SQLite pool and run pending migrations
///
/// An in-memory database lives only as long as its connection, so for
/// `:memory:` URLs the pool is pinned to one connection that never expires.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool_options = if config.database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.db_max_connections)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        sqlx::Error::from(e)
    })?;
    tracing::info!("Database ready");

    Ok(pool)
}
