//! # Notes Core
//!
//! Core business logic and domain layer for the notes backend.
//! This crate contains the session and credential subsystem: domain
//! entities, repository interfaces, password hashing, the access-token
//! codec, and the `SessionService` that orchestrates sign-up, sign-in,
//! logout and refresh-token rotation.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    generate_token_id, token_id_prefix, Claims, RefreshToken, TokenPair, User, UserCredentials,
    REFRESH_TOKEN_ID_LENGTH,
};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    Clock, ManualClock, PasswordHasher, SessionConfig, SessionService, SystemClock, TokenCodec,
    ACCESS_TOKEN_ALGORITHM,
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use notes_shared::config::AuthConfig;

    use crate::repositories::{MockTokenRepository, MockUserRepository};

    #[tokio::test]
    async fn test_root_reexports_wire_a_session_service() {
        let clock = Arc::new(crate::ManualClock::new(chrono::Utc::now()));
        let mut auth = AuthConfig::default();
        auth.password.bcrypt_cost = 4;
        let service: crate::SessionService<MockUserRepository, MockTokenRepository> =
            crate::SessionService::new(
                Arc::new(MockUserRepository::new()),
                Arc::new(MockTokenRepository::new()),
                clock,
                &auth,
            );

        let result: crate::DomainResult<crate::TokenPair> = service.sign_in("", "").await;
        assert!(matches!(result, Err(crate::DomainError::Authentication)));
    }
}
