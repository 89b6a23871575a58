//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are keyed by their token id; there is at most one record per id.
/// A user may hold any number of live records at once.
///
/// # Atomicity
/// `delete` is the claim step of refresh-token rotation. Implementations
/// must perform it as a single atomic statement (or inside a transaction)
/// so that, among any number of concurrent callers deleting the same id,
/// exactly one observes `Ok(true)`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh token
    ///
    /// # Returns
    /// * `Ok(())` - Token stored
    /// * `Err(DomainError)` - Store failed (including a duplicate id)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use uuid::Uuid;
    /// # use notes_core::repositories::TokenRepository;
    /// # use notes_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let token = RefreshToken::issue(Uuid::new_v4(), Utc::now(), Duration::days(30));
    /// repo.create(&token).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError>;

    /// Fetch a refresh token by id
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token with that id (never issued, consumed or logged out)
    /// * `Err(DomainError)` - Storage error occurred
    async fn get(&self, token_id: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete a refresh token by id
    ///
    /// # Returns
    /// * `Ok(true)` - A row existed and was removed by this call
    /// * `Ok(false)` - No row was affected
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Delete every token whose expiry is at or before `now`
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records removed
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
