//! Configuration management for the Production & Waste Control backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PWC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Lot lifecycle rules
    pub lifecycle: LifecycleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

/// Lot lifecycle rules
///
/// Shelf life and warning window drifted between 2 and 3 days across
/// deployments of the previous system; both are configuration here, not
/// constants in code.
#[derive(Debug, Deserialize, Clone)]
pub struct LifecycleConfig {
    /// Days from production to expiry for a new lot
    pub shelf_life_days: i64,

    /// Days before expiry at which a lot counts as near-expiry
    /// (day 0, "expires today", is the last near-expiry day)
    pub warning_window_days: i64,

    /// Whether an already expired lot may still be remarked
    pub allow_expired_remark: bool,

    /// Minimum shelf-life extension accepted by a remark
    pub min_extension_days: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PWC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("lifecycle.shelf_life_days", 3)?
            .set_default("lifecycle.warning_window_days", 2)?
            .set_default("lifecycle.allow_expired_remark", false)?
            .set_default("lifecycle.min_extension_days", 1)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PWC_ prefix)
            .add_source(
                Environment::with_prefix("PWC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shelf_life_days: 3,
            warning_window_days: 2,
            allow_expired_remark: false,
            min_extension_days: 1,
        }
    }
}
