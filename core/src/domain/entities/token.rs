//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a freshly generated refresh token id
pub const REFRESH_TOKEN_ID_LENGTH: usize = 48;

/// Claims structure for the access-token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID); absent decodes as empty and is rejected on verify
    #[serde(default)]
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token issued at `now` and valid for `ttl`
    pub fn new_access_token(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Checks if the claims have expired at `now` (expiry instant included)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Persisted refresh token record.
///
/// Created on sign-in or successful refresh, deleted on logout or when a
/// refresh consumes it. Never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Opaque random token id handed to the client
    pub token_id: String,

    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a refresh token with a fresh random id
    pub fn issue(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            token_id: generate_token_id(),
            expires_at: now + ttl,
        }
    }

    /// Checks if the refresh token has expired at `now` (expiry instant included)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Generates an opaque, URL-safe refresh token id from the thread-local CSPRNG
pub fn generate_token_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Shortened token id for log fields
pub fn token_id_prefix(token_id: &str) -> &str {
    let end = token_id
        .char_indices()
        .nth(8)
        .map(|(idx, _)| idx)
        .unwrap_or(token_id.len());
    &token_id[..end]
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token id
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
