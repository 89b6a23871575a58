//! Main session service implementation

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use notes_shared::config::AuthConfig;

use crate::domain::entities::token::{token_id_prefix, RefreshToken, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenCodec;

use super::config::SessionConfig;

/// Session service orchestrating credentials, access tokens and refresh tokens
///
/// The service only holds `Arc`s and immutable configuration, so a single
/// instance can be shared across tasks. All mutable state lives in the
/// repositories.
pub struct SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// User repository for credential lookup and sign-up
    user_repository: Arc<U>,
    /// Refresh token store
    token_repository: Arc<T>,
    /// Source of the current instant
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
    codec: TokenCodec,
    config: SessionConfig,
}

impl<U, T> SessionService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_repository` - Repository for refresh token records
    /// * `clock` - Time source used for every issue and expiry decision
    /// * `auth` - Signing secret, token lifetimes, bcrypt cost and store deadline
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        clock: Arc<dyn Clock>,
        auth: &AuthConfig,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            clock,
            hasher: PasswordHasher::new(&auth.password),
            codec: TokenCodec::new(&auth.jwt),
            config: SessionConfig::from(auth),
        }
    }

    /// Session lifetimes and deadlines in use
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn password_hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Register a new user
    ///
    /// Empty inputs are rejected before any storage call. A duplicate
    /// username or email is reported like any other create failure.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The new user's id
    /// * `Err(DomainError::Validation)` - An input is empty
    /// * `Err(DomainError::Storage)` - Hashing or persistence failed
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> DomainResult<Uuid> {
        if username.is_empty() {
            return Err(DomainError::validation("empty username"));
        }
        if email.is_empty() {
            return Err(DomainError::validation("empty email"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("empty password"));
        }

        let password_hash = self.hash_password(password).await?;
        let user = User::new(username, email, password_hash, self.clock.now());
        user.validate()?;

        self.with_deadline("create user", self.user_repository.create(&user))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, email = %email, "failed to create user");
                e
            })?;

        tracing::info!(user_id = %user.id, email = %email, "user signed up");
        Ok(user.id)
    }

    /// Authenticate with email and password and open a new session
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Authentication);
        }

        let credentials = self
            .with_deadline(
                "find user credentials",
                self.user_repository.find_credentials_by_email(email),
            )
            .await?;

        let Some(credentials) = credentials else {
            tracing::warn!(email = %email, "sign-in for unknown email");
            // Same bcrypt work as a wrong password
            let _ = self.verify_password(None, password).await;
            return Err(DomainError::Authentication);
        };

        if let Err(e) = self
            .verify_password(Some(credentials.password_hash), password)
            .await
        {
            tracing::warn!(user_id = %credentials.user_id, "sign-in with wrong password");
            return Err(e);
        }

        let pair = self.issue_pair(credentials.user_id, self.clock.now()).await?;
        tracing::info!(user_id = %credentials.user_id, "user signed in");
        Ok(pair)
    }

    /// End a session by deleting its refresh token
    ///
    /// Logout is not idempotent: an unknown or already consumed token yields
    /// `DomainError::NotFound`. On `DomainError::Timeout` the token must be
    /// treated as consumed.
    pub async fn logout(&self, refresh_token_id: &str) -> DomainResult<()> {
        let deleted = self
            .with_deadline(
                "delete refresh token",
                self.token_repository.delete(refresh_token_id),
            )
            .await?;

        if !deleted {
            tracing::warn!(
                token_id = %token_id_prefix(refresh_token_id),
                "logout with unknown refresh token"
            );
            return Err(DomainError::not_found("refresh token"));
        }

        tracing::info!(token_id = %token_id_prefix(refresh_token_id), "session logged out");
        Ok(())
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// The presented token is consumed by a single atomic delete before its
    /// expiry is checked, so of any number of concurrent calls with the same
    /// token at most one succeeds, and an expired token is burned on first
    /// presentation. Never retry this call blindly: on
    /// `DomainError::Timeout` the token may already be gone.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - A new access token and a new refresh token
    /// * `Err(DomainError::Authentication)` - Unknown, consumed or expired token
    pub async fn refresh(&self, refresh_token_id: &str) -> DomainResult<TokenPair> {
        if refresh_token_id.is_empty() {
            return Err(DomainError::Authentication);
        }

        let now = self.clock.now();
        let prefix = token_id_prefix(refresh_token_id);

        let record = self
            .with_deadline("get refresh token", self.token_repository.get(refresh_token_id))
            .await?;
        let Some(record) = record else {
            tracing::warn!(token_id = %prefix, "refresh with unknown token");
            return Err(DomainError::Authentication);
        };

        // Claim the token; only the caller whose delete removed the row continues
        let claimed = self
            .with_deadline(
                "delete refresh token",
                self.token_repository.delete(refresh_token_id),
            )
            .await?;
        if !claimed {
            tracing::warn!(
                token_id = %prefix,
                user_id = %record.user_id,
                "refresh token already consumed"
            );
            return Err(DomainError::Authentication);
        }

        if record.is_expired_at(now) {
            tracing::warn!(
                token_id = %prefix,
                user_id = %record.user_id,
                expired_at = %record.expires_at,
                "refresh with expired token"
            );
            return Err(DomainError::Authentication);
        }

        let pair = self.issue_pair(record.user_id, now).await?;
        tracing::info!(
            user_id = %record.user_id,
            token_id = %prefix,
            new_token_id = %token_id_prefix(&pair.refresh_token),
            "refresh token rotated"
        );
        Ok(pair)
    }

    /// Verify an access token and return its subject
    ///
    /// Every failure reason collapses into `DomainError::Authentication`;
    /// the reason itself is only logged at debug level.
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Uuid> {
        self.codec
            .verify(token, self.clock.now())
            .map_err(|reason| {
                tracing::debug!(reason = %reason, "access token rejected");
                DomainError::Authentication
            })
    }

    /// Delete every refresh record whose expiry is at or before now
    ///
    /// Live records are never touched.
    pub async fn purge_expired_refresh_tokens(&self) -> DomainResult<u64> {
        let now = self.clock.now();
        let purged = self
            .with_deadline(
                "delete expired refresh tokens",
                self.token_repository.delete_expired(now),
            )
            .await?;

        if purged > 0 {
            tracing::info!(purged, "purged expired refresh tokens");
        } else {
            tracing::debug!("no expired refresh tokens to purge");
        }
        Ok(purged)
    }

    /// Sign an access token and persist a fresh refresh record for `user_id`
    async fn issue_pair(&self, user_id: Uuid, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let access_token = self
            .codec
            .issue(user_id, self.config.access_ttl, now)
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "failed to sign access token");
                DomainError::storage("failed to issue access token")
            })?;

        let record = RefreshToken::issue(user_id, now, self.config.refresh_ttl);
        self.with_deadline("create refresh token", self.token_repository.create(&record))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "failed to store refresh token");
                e
            })?;

        Ok(TokenPair::new(
            access_token,
            record.token_id,
            self.config.access_ttl,
            self.config.refresh_ttl,
        ))
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing task failed");
                DomainError::storage("failed to hash password")
            })?
    }

    async fn verify_password(&self, hash: Option<String>, password: &str) -> DomainResult<()> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => hasher.verify(&hash, &password),
            None => hasher.verify_dummy(&password),
        })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "password verification task failed");
                DomainError::Authentication
            })?
    }

    /// Run a store call under the configured deadline
    async fn with_deadline<F, R>(&self, operation: &'static str, call: F) -> DomainResult<R>
    where
        F: Future<Output = DomainResult<R>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "store call timed out"
                );
                Err(DomainError::timeout(operation))
            }
        }
    }
}
