//! Signed access-token encoding and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use uuid::Uuid;

use notes_shared::config::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// The only algorithm this codec signs with or accepts
pub const ACCESS_TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Stateless HS256 access-token codec.
///
/// The codec never consults the wall clock: callers pass the instant to
/// issue at and to verify against. A token is valid while `now < exp`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the configured signing secret
    pub fn new(config: &JwtConfig) -> Self {
        Self::from_secret(config.secret.expose_secret().as_bytes())
    }

    /// Build a codec from raw secret bytes
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ACCESS_TOKEN_ALGORITHM);
        // `exp` is checked against the injected clock in `verify`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign an access token for `subject`, issued at `now` and valid for `ttl`
    pub fn issue(
        &self,
        subject: Uuid,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new_access_token(subject, now, ttl);
        encode(&Header::new(ACCESS_TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Verify signature, algorithm, subject and expiry; return the subject
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }
        let subject = claims.user_id().map_err(|_| TokenError::InvalidSubject)?;
        if subject.is_nil() {
            return Err(TokenError::InvalidSubject);
        }

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(subject)
    }
}
