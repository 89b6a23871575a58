//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Every mutation happens under a single write lock, which gives `delete`
/// the same single-winner semantics as a one-statement SQL delete.
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    /// Artificial latency applied to every call, in milliseconds
    delay_ms: AtomicU64,
    /// Extra latency applied to `delete` only, in milliseconds
    delete_delay_ms: AtomicU64,
    fail_create: AtomicBool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            delay_ms: AtomicU64::new(0),
            delete_delay_ms: AtomicU64::new(0),
            fail_create: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call sleep before touching the map
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` sleep before removing the record
    pub fn set_delete_delay(&self, delay: Duration) {
        self.delete_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make every subsequent `create` fail with a storage error
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether a record with this id is stored
    pub async fn contains(&self, token_id: &str) -> bool {
        self.tokens.read().await.contains_key(token_id)
    }

    async fn simulate_latency(&self) {
        sleep_ms(self.delay_ms.load(Ordering::SeqCst)).await;
    }
}

async fn sleep_ms(delay: u64) {
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError> {
        self.simulate_latency().await;

        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::storage("failed to create token: injected failure"));
        }

        let mut tokens = self.tokens.write().await;
        if tokens.contains_key(&token.token_id) {
            return Err(DomainError::storage("failed to create token: duplicate token id"));
        }

        tokens.insert(token.token_id.clone(), token.clone());
        Ok(())
    }

    async fn get(&self, token_id: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.simulate_latency().await;

        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_id).cloned())
    }

    async fn delete(&self, token_id: &str) -> Result<bool, DomainError> {
        self.simulate_latency().await;
        sleep_ms(self.delete_delay_ms.load(Ordering::SeqCst)).await;

        let mut tokens = self.tokens.write().await;
        Ok(tokens.remove(token_id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.simulate_latency().await;

        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();
        tokens.retain(|_, token| !token.is_expired_at(now));

        Ok((initial_count - tokens.len()) as u64)
    }
}
