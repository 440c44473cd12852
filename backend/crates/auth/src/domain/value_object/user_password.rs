//! User Password Value Object
//!
//! Domain password types built on `platform::password` for the
//! cryptographic operations.
//!
//! Registration enforces the special-character policy here; login works
//! with `platform::password::ClearTextPassword` directly, since stored
//! accounts may predate policy changes and the authenticator must only
//! compare, never re-validate.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;
use thiserror::Error;

/// Password validation errors at registration
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Every character is alphanumeric or underscore
    #[error("Password must contain at least one special character eg.\"~!@#$%^&*\"")]
    NoSpecialCharacter,

    /// Structural violation (empty, too long, control characters)
    #[error(transparent)]
    Structural(#[from] PasswordPolicyError),
}

/// Raw password accepted at registration
///
/// Wraps `ClearTextPassword` (zeroized on drop) and additionally enforces
/// the registration policy: at least one character outside the
/// alphanumeric/underscore set.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with policy validation
    pub fn new(raw: String) -> Result<Self, PasswordError> {
        let clear_text = ClearTextPassword::new(raw)?;

        let has_special = clear_text
            .chars()
            .any(|ch| !ch.is_alphanumeric() && ch != '_');
        if !has_special {
            return Err(PasswordError::NoSpecialCharacter);
        }

        Ok(Self(clear_text))
    }

    /// Access the underlying clear text (for hashing)
    pub fn clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed password stored with the credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        Ok(Self(raw.clear_text().hash(pepper)?))
    }

    /// Restore from a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        Ok(Self(HashedPassword::from_phc_string(s)?))
    }

    /// Verify a submitted password against this hash
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(password, pepper)
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_character_required() {
        let result = RawPassword::new("Password123".to_string());
        assert!(matches!(result, Err(PasswordError::NoSpecialCharacter)));
    }

    #[test]
    fn test_underscore_is_not_special() {
        let result = RawPassword::new("Password_123".to_string());
        assert!(matches!(result, Err(PasswordError::NoSpecialCharacter)));
    }

    #[test]
    fn test_special_characters_accepted() {
        for pw in ["Password@123", "Password#123", "Password!123", "pass word1"] {
            assert!(RawPassword::new(pw.to_string()).is_ok(), "rejected {pw}");
        }
    }

    #[test]
    fn test_structural_errors_pass_through() {
        let result = RawPassword::new("".to_string());
        assert!(matches!(result, Err(PasswordError::Structural(_))));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let raw = RawPassword::new("Password@123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(raw.clear_text(), None));

        let wrong = ClearTextPassword::new("Password@124".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_roundtrip() {
        let raw = RawPassword::new("Password@123".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(raw.clear_text(), None));
    }
}
