//! User entity as seen by the session core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique display name
    pub username: String,

    /// Unique login email
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional avatar URL
    pub image_url: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a freshly generated id
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rejects a nil id or any empty required field
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.is_nil() {
            return Err(DomainError::validation("invalid user ID"));
        }
        if self.username.is_empty() {
            return Err(DomainError::validation("empty username"));
        }
        if self.email.is_empty() {
            return Err(DomainError::validation("empty email"));
        }
        if self.password_hash.is_empty() {
            return Err(DomainError::validation("empty password"));
        }
        Ok(())
    }
}

/// The two user fields sign-in needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: Uuid,
    pub password_hash: String,
}
