//! Register Use Case
//!
//! Validates a registration submission field by field, hashes the secret,
//! and persists the new account. Errors are accumulated per field: the
//! first failing check wins within a field, but every field is checked.
//! The confirmation cross-check always runs, whatever the password
//! field's own outcome.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::{PERSON_NAME_MAX_LENGTH, PersonName, PersonNameError},
    user_name::{UserName, UserNameError},
    user_password::{PasswordError, RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Messages mirror the wire contract of the public API
const MSG_REQUIRED: &str = "This field is required.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_INVALID_EMAIL: &str = "Enter a valid email address.";
const MSG_INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
const MSG_USERNAME_TOO_LONG: &str = "Ensure this field has no more than 150 characters.";
const MSG_USERNAME_TAKEN: &str = "A user with that username already exists.";
const MSG_EMAIL_TAKEN: &str = "user with this email already exists.";
const MSG_PASSWORD_MISMATCH: &str = "Password do not match";

/// Registration input (wire-level optional so that "missing" is a field
/// error, not a deserialization failure)
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Registration output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let mut errors = FieldErrors::new();

        let first_name = validate_person_name("first_name", &input.first_name, &mut errors);
        let last_name = validate_person_name("last_name", &input.last_name, &mut errors);
        let username = validate_username(&input.username, &mut errors);
        let email = validate_email(&input.email, &mut errors);
        let password = validate_password(&input.password, &mut errors);

        // Confirmation cross-check runs regardless of the password field's
        // own validation outcome
        match (&input.password, &input.confirm_password) {
            (_, None) => errors.add("confirm_password", MSG_REQUIRED),
            (Some(password), Some(confirm)) if password != confirm => {
                errors.add("confirm_password", MSG_PASSWORD_MISMATCH);
            }
            _ => {}
        }

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        // All per-field checks passed; the Options are guaranteed filled
        let (Some(first_name), Some(last_name), Some(username), Some(email), Some(password)) =
            (first_name, last_name, username, email, password)
        else {
            return Err(AuthError::Internal(
                "Field validation passed but a value is missing".to_string(),
            ));
        };

        // Uniqueness pre-checks surface as field errors; the store's
        // unique constraints remain the race backstop below
        if self.repo.exists_by_username(&username).await? {
            errors.add("username", MSG_USERNAME_TAKEN);
        }
        if self.repo.exists_by_email(&email).await? {
            errors.add("email", MSG_EMAIL_TAKEN);
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(username, email, first_name, last_name);
        let credentials = Credentials::new(user.user_id, password_hash);

        match self.repo.create(&user, &credentials).await {
            Ok(()) => {}
            Err(AuthError::UsernameTaken) => {
                let mut errors = FieldErrors::new();
                errors.add("username", MSG_USERNAME_TAKEN);
                return Err(AuthError::Validation(errors));
            }
            Err(AuthError::EmailTaken) => {
                let mut errors = FieldErrors::new();
                errors.add("email", MSG_EMAIL_TAKEN);
                return Err(AuthError::Validation(errors));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput { user })
    }
}

// ============================================================================
// Field validators (first failing check per field wins)
// ============================================================================

fn validate_person_name(
    field: &str,
    value: &Option<String>,
    errors: &mut FieldErrors,
) -> Option<PersonName> {
    let Some(value) = value else {
        errors.add(field, MSG_REQUIRED);
        return None;
    };

    match PersonName::new(value.clone()) {
        Ok(name) => Some(name),
        Err(PersonNameError::Blank) => {
            errors.add(field, MSG_BLANK);
            None
        }
        Err(PersonNameError::TooLong) => {
            errors.add(
                field,
                format!(
                    "Ensure this field has no more than {} characters.",
                    PERSON_NAME_MAX_LENGTH
                ),
            );
            None
        }
    }
}

fn validate_username(value: &Option<String>, errors: &mut FieldErrors) -> Option<UserName> {
    let Some(value) = value else {
        errors.add("username", MSG_REQUIRED);
        return None;
    };

    match UserName::new(value.clone()) {
        Ok(name) => Some(name),
        Err(UserNameError::Blank) => {
            errors.add("username", MSG_BLANK);
            None
        }
        Err(UserNameError::TooLong) => {
            errors.add("username", MSG_USERNAME_TOO_LONG);
            None
        }
        Err(UserNameError::InvalidCharacter) => {
            errors.add("username", MSG_INVALID_USERNAME);
            None
        }
    }
}

fn validate_email(value: &Option<String>, errors: &mut FieldErrors) -> Option<Email> {
    let Some(value) = value else {
        errors.add("email", MSG_REQUIRED);
        return None;
    };

    match Email::new(value.clone()) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.add("email", MSG_INVALID_EMAIL);
            None
        }
    }
}

fn validate_password(value: &Option<String>, errors: &mut FieldErrors) -> Option<RawPassword> {
    let Some(value) = value else {
        errors.add("password", MSG_REQUIRED);
        return None;
    };

    match RawPassword::new(value.clone()) {
        Ok(password) => Some(password),
        Err(e @ PasswordError::NoSpecialCharacter) => {
            errors.add("password", e.to_string());
            None
        }
        Err(PasswordError::Structural(platform::password::PasswordPolicyError::EmptyOrWhitespace)) => {
            errors.add("password", MSG_BLANK);
            None
        }
        Err(PasswordError::Structural(e)) => {
            errors.add("password", e.to_string());
            None
        }
    }
}
