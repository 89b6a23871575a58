//! Shared utilities and common types for the notes server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Configuration error types
//! - Tracing subscriber setup

pub mod config;
pub mod errors;
pub mod telemetry;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, PasswordConfig,
};
pub use errors::ConfigurationError;
pub use telemetry::init_tracing;
