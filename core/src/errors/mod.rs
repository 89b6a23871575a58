//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors returned by every session operation.
///
/// `Authentication` is opaque: bad passwords, unknown emails,
/// tampered or expired access tokens and unknown, consumed or expired
/// refresh tokens all map to it. The specific reason is only logged.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication failed")]
    Authentication,

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    /// The store did not answer before the deadline. For consuming steps the
    /// write may or may not have been committed.
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Whether the failure may go away on its own.
    ///
    /// Only read-only operations may be retried on a transient error;
    /// `refresh` and `logout` consume their token and must never be retried
    /// blindly.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound { .. } | DomainError::Storage { .. } | DomainError::Timeout { .. }
        )
    }

    /// Whether a consuming operation may have committed despite failing.
    ///
    /// Callers must treat the presented refresh token as consumed when this
    /// returns `true`.
    pub fn is_outcome_unknown(&self) -> bool {
        matches!(self, DomainError::Timeout { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
