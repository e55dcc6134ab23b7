//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `MENU_BOT` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use menu_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod bot;
mod database;
mod error;
mod geocoder;
mod redis;
mod server;

pub use bot::{BotConfig, StateBackend};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use geocoder::GeocoderConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection (customers, addresses, zones, settings)
    pub database: DatabaseConfig,

    /// Redis connection (dialogue state)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Bot token, webhook and state backend
    pub bot: BotConfig,

    /// Reverse geocoder
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MENU_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MENU_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MENU_BOT__BOT__TOKEN=...` -> `bot.token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MENU_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Redis is only checked when it backs the dialogue state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        if self.bot.state_backend == StateBackend::Redis {
            self.redis.validate()?;
        }
        self.bot.validate(self.is_production())?;
        self.geocoder.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
