//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh token ids are never written to the database: rows are keyed by
//! the SHA-256 digest of the id, so a dump of `refresh_tokens` cannot be
//! replayed. A consumed token is deleted, never flagged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use notes_core::domain::entities::token::{token_id_prefix, RefreshToken};
use notes_core::errors::DomainError;
use notes_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token id using SHA-256
    ///
    /// # Returns
    /// Lowercase hexadecimal SHA-256 digest (64 characters)
    pub fn hash_token(token_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token_id.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Rebuild a record from a row; the id itself is only known to the caller
    fn row_to_token(
        row: &sqlx::mysql::MySqlRow,
        token_id: &str,
    ) -> Result<RefreshToken, DomainError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::storage(format!("Failed to get user_id: {}", e)))?;

        Ok(RefreshToken {
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::storage(format!("Invalid user UUID: {}", e)))?,
            token_id: token_id.to_string(),
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::storage(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (token_hash, user_id, expires_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&token.token_id))
            .bind(token.user_id.to_string())
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    token_id = %token_id_prefix(&token.token_id),
                    "failed to insert refresh token"
                );
                DomainError::storage(format!("Failed to save refresh token: {}", e))
            })?;

        Ok(())
    }

    async fn get(&self, token_id: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT user_id, expires_at
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(Self::hash_token(token_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find refresh token: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row, token_id)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, token_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
            .bind(Self::hash_token(token_id))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete refresh token: {}", e)))?;

        // Under concurrent deletes of the same row exactly one sees rows_affected == 1
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to delete expired refresh tokens: {}", e))
            })?;

        Ok(result.rows_affected())
    }
}
