//! Shared error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Values were read but are not usable
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// The tracing subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}

impl ConfigurationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}
