//! Login Use Case
//!
//! Authenticates an email/password pair, issues a token pair, and
//! enqueues the thank-you notification. Unknown account, wrong password,
//! and disabled account all collapse into the same opaque failure, and
//! the unknown-account path runs a throwaway hash verification so the
//! paths do comparable work.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::{TokenIssuer, TokenPair};
use crate::domain::entity::user::User;
use crate::domain::notification::{LoginNotification, LoginNotifier};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

const MSG_REQUIRED: &str = "This field is required.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";

/// Login input
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<R, N>
where
    R: UserRepository + CredentialsRepository,
    N: LoginNotifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    issuer: TokenIssuer,
    config: Arc<AuthConfig>,
}

impl<R, N> LoginUseCase<R, N>
where
    R: UserRepository + CredentialsRepository,
    N: LoginNotifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            notifier,
            issuer: TokenIssuer::new(config.clone()),
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (email, password) = validate_shape(input)?;

        // Submitted secrets that fail structural checks cannot match any
        // stored hash; degrade to the opaque failure
        let password = match ClearTextPassword::new(password) {
            Ok(p) => p,
            Err(_) => return Err(AuthError::AuthenticationFailed),
        };

        let user = match self.repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                platform::password::dummy_verify(&password);
                return Err(AuthError::AuthenticationFailed);
            }
        };

        let credentials = self
            .repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        if !credentials
            .password_hash
            .verify(&password, self.config.pepper())
        {
            return Err(AuthError::AuthenticationFailed);
        }

        // Disabled accounts fail the same way as bad credentials, and
        // only after the hash comparison
        if !user.can_login() {
            return Err(AuthError::AuthenticationFailed);
        }

        let mut user = user;
        user.record_login();
        self.repo.update(&user).await?;

        let tokens = self.issuer.issue_pair(&user)?;

        // Fire-and-forget; a dead queue must not fail the login
        self.notifier.enqueue(LoginNotification {
            email: user.email.as_str().to_string(),
        });

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User logged in"
        );

        Ok(LoginOutput { user, tokens })
    }
}

/// Validate the input shape; malformed input is a field-error response,
/// not an authentication failure
fn validate_shape(input: LoginInput) -> AuthResult<(Email, String)> {
    let mut errors = FieldErrors::new();

    let email = match &input.email {
        None => {
            errors.add("email", MSG_REQUIRED);
            None
        }
        Some(raw) => match Email::new(raw.clone()) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.add("email", MSG_INVALID_EMAIL);
                None
            }
        },
    };

    match &input.password {
        None => errors.add("password", MSG_REQUIRED),
        Some(p) if p.trim().is_empty() => errors.add("password", MSG_BLANK),
        Some(_) => {}
    }

    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    // Both checked above
    let email = email.ok_or_else(|| AuthError::Internal("Email missing".to_string()))?;
    let password = input
        .password
        .ok_or_else(|| AuthError::Internal("Password missing".to_string()))?;

    Ok((email, password))
}
