//! Person Name Value Object
//!
//! First/last name as entered at registration.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for a first or last name (in characters)
pub const PERSON_NAME_MAX_LENGTH: usize = 35;

/// Person name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonNameError {
    /// Empty or whitespace-only
    #[error("Name may not be blank")]
    Blank,

    /// Too long after normalization
    #[error("Name must be at most {PERSON_NAME_MAX_LENGTH} characters")]
    TooLong,
}

/// First or last name value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Create a new person name with validation
    pub fn new(raw: impl Into<String>) -> Result<Self, PersonNameError> {
        let normalized: String = raw.into().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(PersonNameError::Blank);
        }

        if trimmed.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(PersonNameError::TooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
