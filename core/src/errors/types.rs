//! Access-token verification failure reasons
//!
//! These never leave the crate boundary as-is: `SessionService` logs the
//! reason and returns `DomainError::Authentication`.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("Malformed token")]
    Malformed,

    #[error("Missing subject claim")]
    MissingSubject,

    #[error("Subject claim is not a valid identifier")]
    InvalidSubject,

    #[error("Token generation failed")]
    GenerationFailed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::AlgorithmMismatch
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::MissingRequiredClaim(claim) if claim == "sub" => TokenError::MissingSubject,
            _ => TokenError::Malformed,
        }
    }
}
