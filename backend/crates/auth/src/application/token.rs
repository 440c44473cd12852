//! Token Issuer
//!
//! Converts an authenticated identity into a signed access/refresh token
//! pair (HMAC-SHA256). Tokens are never persisted server-side; validity
//! is determined by signature and expiry alone. The `token_use` claim
//! keeps the two kinds apart: a refresh token cannot authenticate a
//! request and an access token cannot be refreshed.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;

/// Discriminates access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// Claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer
    pub iss: String,
    /// Subject - user ID
    pub sub: String,
    /// JWT ID - unique per issued token
    pub jti: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Access or refresh
    pub token_use: TokenUse,
    /// User's display name
    pub username: String,
}

impl Claims {
    /// Parse the subject back into a user UUID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidToken)
    }
}

/// A freshly issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token generation and validation errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token format")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token not valid for this use")]
    WrongUse,

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// Issues and verifies signed tokens
///
/// Holds the process-wide signing configuration; construct once at
/// startup and share.
#[derive(Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// Issue an access/refresh pair for a verified identity
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        let sub = user.user_id.to_string();
        let username = user.username.original();

        Ok(TokenPair {
            access: self.sign(&sub, username, TokenUse::Access)?,
            refresh: self.sign(&sub, username, TokenUse::Refresh)?,
        })
    }

    /// Verify an access token
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenUse::Access)
    }

    /// Verify a refresh token
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenUse::Refresh)
    }

    /// Mint a new access token from a valid refresh token
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_refresh(refresh_token)?;
        self.sign(&claims.sub, &claims.username, TokenUse::Access)
    }

    fn sign(&self, sub: &str, username: &str, token_use: TokenUse) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let ttl = match token_use {
            TokenUse::Access => self.config.access_ttl,
            TokenUse::Refresh => self.config.refresh_ttl,
        };

        let claims = Claims {
            iss: self.config.token_issuer.clone(),
            sub: sub.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + ttl.as_secs(),
            token_use,
            username: username.to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.config.token_secret),
        )?;

        Ok(token)
    }

    fn verify(&self, token: &str, expected_use: TokenUse) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.token_issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.config.token_secret),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::InvalidToken,
        })?;

        if token_data.claims.token_use != expected_use {
            return Err(TokenError::WrongUse);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email, person_name::PersonName, user_name::UserName,
    };

    fn test_user() -> User {
        User::new(
            UserName::new("janedoe").unwrap(),
            Email::new("janedoe@example.com").unwrap(),
            PersonName::new("Jane").unwrap(),
            PersonName::new("Doe").unwrap(),
        )
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(Arc::new(AuthConfig::with_random_secret()))
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let issuer = issuer();
        let user = test_user();

        let pair = issuer.issue_pair(&user).unwrap();

        let access = issuer.verify_access(&pair.access).unwrap();
        assert_eq!(access.sub, user.user_id.to_string());
        assert_eq!(access.username, "janedoe");
        assert_eq!(access.token_use, TokenUse::Access);
        assert_eq!(access.user_id().unwrap(), *user.user_id.as_uuid());

        let refresh = issuer.verify_refresh(&pair.refresh).unwrap();
        assert_eq!(refresh.sub, user.user_id.to_string());
        assert_eq!(refresh.token_use, TokenUse::Refresh);
    }

    #[test]
    fn test_token_use_is_enforced() {
        let issuer = issuer();
        let pair = issuer.issue_pair(&test_user()).unwrap();

        assert!(matches!(
            issuer.verify_access(&pair.refresh),
            Err(TokenError::WrongUse)
        ));
        assert!(matches!(
            issuer.verify_refresh(&pair.access),
            Err(TokenError::WrongUse)
        ));
    }

    #[test]
    fn test_refresh_mints_access() {
        let issuer = issuer();
        let user = test_user();
        let pair = issuer.issue_pair(&user).unwrap();

        let new_access = issuer.refresh_access(&pair.refresh).unwrap();
        let claims = issuer.verify_access(&new_access).unwrap();
        assert_eq!(claims.sub, user.user_id.to_string());

        // An access token cannot be refreshed
        assert!(matches!(
            issuer.refresh_access(&pair.access),
            Err(TokenError::WrongUse)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let issuer = issuer();
        assert!(issuer.verify_access("not.a.token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer1 = TokenIssuer::new(Arc::new(AuthConfig::with_random_secret()));
        let issuer2 = TokenIssuer::new(Arc::new(AuthConfig::with_random_secret()));

        let pair = issuer1.issue_pair(&test_user()).unwrap();
        assert!(issuer2.verify_access(&pair.access).is_err());
    }

    #[test]
    fn test_expired_token() {
        let config = Arc::new(AuthConfig::with_random_secret());
        let issuer = TokenIssuer::new(config.clone());

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        // Token that expired an hour ago
        let claims = Claims {
            iss: config.token_issuer.clone(),
            sub: Uuid::new_v4().to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
            token_use: TokenUse::Access,
            username: "janedoe".to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&config.token_secret),
        )
        .unwrap();

        assert!(matches!(
            issuer.verify_access(&token),
            Err(TokenError::ExpiredToken)
        ));
    }
}
