//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::time::Duration;

use serde::Deserialize;

/// Errors raised while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed into its expected type.
    #[error("Invalid environment: {0}")]
    Env(#[from] envy::Error),

    /// A variable required to build the database connection string is missing.
    #[error("{0} is required when DATABASE_URL is not set")]
    Missing(&'static str),
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): full PostgreSQL connection string. When absent it is
///   assembled from the `POSTGRES_*` variables below.
/// - `POSTGRES_HOST` / `POSTGRES_PORT` / `POSTGRES_DB`: defaults `localhost`, `5432`, `accountmanagementapi`
/// - `POSTGRES_USER` / `POSTGRES_PASSWORD`: required unless `DATABASE_URL` is set
/// - `PORT` (optional): HTTP server port, defaults to 8080
/// - `ENVIRONMENT` (optional): `development` or `production`; production switches logs to JSON
/// - `LOG_LEVEL` (optional): fallback filter when `RUST_LOG` is unset, defaults to `info`
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `REQUEST_TIMEOUT_SECS` (optional): per-request deadline, defaults to 30
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: Option<String>,

    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,

    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    pub postgres_user: Option<String>,

    pub postgres_password: Option<String>,

    #[serde(default = "default_postgres_db")]
    pub postgres_db: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_postgres_host() -> String {
    "localhost".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_db() -> String {
    "accountmanagementapi".to_string()
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    8080
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Environment variable values cannot be parsed into expected types
    /// - Neither `DATABASE_URL` nor the `POSTGRES_*` credentials are provided
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: postgres_host -> POSTGRES_HOST
        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that a connection string can be produced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database_url().map(|_| ())
    }

    /// Connection string for the PostgreSQL pool.
    ///
    /// An explicit `DATABASE_URL` wins; otherwise the URL is built from the
    /// individual `POSTGRES_*` settings.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.database_url.as_ref().filter(|url| !url.is_empty()) {
            return Ok(url.clone());
        }

        let user = self
            .postgres_user
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("POSTGRES_USER"))?;
        let password = self
            .postgres_password
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("POSTGRES_PASSWORD"))?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            user, password, self.postgres_host, self.postgres_port, self.postgres_db
        ))
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
