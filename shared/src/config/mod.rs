//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, token lifetimes and password hashing
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//!
//! Values are layered with the `config` crate: `config/default.toml`, then
//! `config/{environment}.toml`, then `APP__*` environment variables
//! (e.g. `APP__AUTH__JWT__SECRET`). A `.env` file is loaded first if present.

pub mod auth;
pub mod database;
pub mod environment;

use ::config::{Config, Environment as EnvSource, File};
use serde::Deserialize;

use crate::errors::ConfigurationError;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `./config` and the process environment
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::load_from("config")
    }

    /// Load configuration from the given directory and the process environment
    pub fn load_from(config_dir: &str) -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let env = Environment::from_env();
        tracing::debug!(environment = %env, config_dir, "loading configuration");

        let settings = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            .add_source(
                File::with_name(&format!("{}/{}", config_dir, env.config_name())).required(false),
            )
            .add_source(EnvSource::with_prefix("APP").separator("__").try_parsing(true))
            .set_override("environment", env.config_name())?
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations that cannot run safely
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        use secrecy::ExposeSecret;

        let jwt = &self.auth.jwt;
        if jwt.secret.expose_secret().is_empty() {
            return Err(ConfigurationError::invalid("auth.jwt.secret must not be empty"));
        }
        if jwt.access_token_ttl_secs <= 0 {
            return Err(ConfigurationError::invalid(
                "auth.jwt.access_token_ttl_secs must be positive",
            ));
        }
        if jwt.refresh_token_ttl_secs <= 0 {
            return Err(ConfigurationError::invalid(
                "auth.jwt.refresh_token_ttl_secs must be positive",
            ));
        }
        if !(bcrypt_cost_range().contains(&self.auth.password.bcrypt_cost)) {
            return Err(ConfigurationError::invalid(
                "auth.password.bcrypt_cost must be between 4 and 31",
            ));
        }
        if self.auth.store_timeout_ms == 0 {
            return Err(ConfigurationError::invalid("auth.store_timeout_ms must be positive"));
        }

        if jwt.is_using_default_secret() {
            if self.environment.is_production() {
                return Err(ConfigurationError::invalid(
                    "auth.jwt.secret uses the built-in default in production",
                ));
            }
            tracing::warn!("auth.jwt.secret uses the built-in development default");
        }

        Ok(())
    }
}

fn bcrypt_cost_range() -> std::ops::RangeInclusive<u32> {
    4..=31
}
