//! Application Configuration
//!
//! Configuration for the Auth application layer. Constructed once at
//! startup and passed by reference into the token issuer and handlers;
//! never a hidden global.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret for tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Issuer claim stamped into every token
    pub token_issuer: String,
    /// Access token lifetime (5 minutes)
    pub access_ttl: Duration,
    /// Refresh token lifetime (1 day)
    pub refresh_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_issuer: "blog-api".to_string(),
            access_ttl: Duration::from_secs(5 * 60),
            refresh_ttl: Duration::from_secs(24 * 3600),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
