//! bcrypt-backed password hashing and verification

use std::sync::{Arc, OnceLock};

use notes_shared::config::PasswordConfig;

use crate::errors::DomainError;

/// Hashes and verifies user passwords.
///
/// Every call to `hash` draws a fresh random salt, so hashing the same
/// password twice never yields the same string. Comparison is delegated to
/// `bcrypt::verify`, which compares digests in constant time.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Stand-in hash for accounts that do not exist; built on first use
    dummy_hash: Arc<OnceLock<Option<String>>>,
}

/// Plaintext behind the stand-in hash; never accepted
const DUMMY_PASSWORD: &str = "no-account-matches-this-email";

impl PasswordHasher {
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Hash a password with a fresh salt
    ///
    /// # Returns
    /// * `Ok(String)` - Modular-crypt bcrypt hash
    /// * `Err(DomainError::Validation)` - Password is empty
    /// * `Err(DomainError::Storage)` - Hashing primitive failed (invalid cost)
    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        if password.is_empty() {
            return Err(DomainError::validation("empty password"));
        }

        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            DomainError::storage("failed to hash password")
        })
    }

    /// Check a password against a stored hash
    ///
    /// Any mismatch, an empty password, or an empty/malformed hash yields
    /// `DomainError::Authentication`.
    pub fn verify(&self, hash: &str, password: &str) -> Result<(), DomainError> {
        if hash.is_empty() || password.is_empty() {
            return Err(DomainError::Authentication);
        }

        match bcrypt::verify(password, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::Authentication),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash could not be parsed");
                Err(DomainError::Authentication)
            }
        }
    }

    /// Spend one full bcrypt verification at the configured cost, then fail
    ///
    /// Used when no stored hash exists, so a missing account costs as much
    /// as a wrong password. Always returns `DomainError::Authentication`.
    pub fn verify_dummy(&self, password: &str) -> Result<(), DomainError> {
        let dummy = self
            .dummy_hash
            .get_or_init(|| bcrypt::hash(DUMMY_PASSWORD, self.cost).ok());

        if let Some(hash) = dummy {
            let _ = bcrypt::verify(password, hash);
        }
        Err(DomainError::Authentication)
    }

    #[cfg(test)]
    pub(crate) fn dummy_hash(&self) -> Option<&str> {
        self.dummy_hash.get().and_then(|hash| hash.as_deref())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(&PasswordConfig::default())
    }
}
