//! Configuration for the session service

use chrono::Duration;

use notes_shared::config::AuthConfig;

/// Lifetimes and deadlines used by the session service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Deadline applied to every repository call
    pub store_timeout: std::time::Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for SessionConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_ttl: Duration::seconds(config.jwt.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(config.jwt.refresh_token_ttl_secs),
            store_timeout: std::time::Duration::from_millis(config.store_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_shared::config::JwtConfig;

    #[test]
    fn test_defaults_follow_auth_config() {
        let config = SessionConfig::default();
        assert_eq!(config.access_ttl, Duration::minutes(15));
        assert_eq!(config.refresh_ttl, Duration::days(30));
        assert_eq!(config.store_timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_from_custom_auth_config() {
        let auth = AuthConfig {
            jwt: JwtConfig::new("secret")
                .with_access_ttl_minutes(5)
                .with_refresh_ttl_days(1),
            store_timeout_ms: 250,
            ..AuthConfig::default()
        };

        let config = SessionConfig::from(&auth);
        assert_eq!(config.access_ttl, Duration::minutes(5));
        assert_eq!(config.refresh_ttl, Duration::days(1));
        assert_eq!(config.store_timeout, std::time::Duration::from_millis(250));
    }
}
