//! Refresh Use Case
//!
//! Mints a new access token from a valid refresh token. Stateless: the
//! refresh token itself carries everything needed.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::error::{AuthError, AuthResult};

/// Refresh input
#[derive(Debug, Clone, Default)]
pub struct RefreshInput {
    pub refresh: Option<String>,
}

/// Refresh output
pub struct RefreshOutput {
    pub access: String,
}

/// Refresh use case
pub struct RefreshUseCase {
    issuer: TokenIssuer,
}

impl RefreshUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            issuer: TokenIssuer::new(config),
        }
    }

    pub fn execute(&self, input: RefreshInput) -> AuthResult<RefreshOutput> {
        let Some(refresh) = input.refresh else {
            let mut errors = FieldErrors::new();
            errors.add("refresh", "This field is required.");
            return Err(AuthError::Validation(errors));
        };

        let access = self.issuer.refresh_access(&refresh)?;

        Ok(RefreshOutput { access })
    }
}
