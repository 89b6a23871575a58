//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{generate_token_id, token_id_prefix, Claims, RefreshToken, TokenPair, REFRESH_TOKEN_ID_LENGTH};
pub use user::{User, UserCredentials};
