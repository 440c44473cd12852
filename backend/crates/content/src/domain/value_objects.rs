//! Content Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length for a category name (in characters)
pub const CATEGORY_NAME_MAX_LENGTH: usize = 30;

/// Maximum length for a post title (in characters)
pub const POST_TITLE_MAX_LENGTH: usize = 200;

/// Category name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryNameError {
    #[error("Category name may not be blank")]
    Blank,

    #[error("Category name must be at most {CATEGORY_NAME_MAX_LENGTH} characters")]
    TooLong,
}

/// Category name, normalized to lowercase on construction
///
/// Case-variant spellings collapse to one category: `"Django"` and
/// `"django"` are the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name; trims, validates, and lowercases
    pub fn new(raw: impl Into<String>) -> Result<Self, CategoryNameError> {
        let trimmed = raw.into().trim().to_string();

        if trimmed.is_empty() {
            return Err(CategoryNameError::Blank);
        }

        if trimmed.chars().count() > CATEGORY_NAME_MAX_LENGTH {
            return Err(CategoryNameError::TooLong);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Create from database value (already normalized)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The normalized (lowercase) name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post title validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostTitleError {
    #[error("Title may not be blank")]
    Blank,

    #[error("Title must be at most {POST_TITLE_MAX_LENGTH} characters")]
    TooLong,
}

/// Post title value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a post title with validation
    pub fn new(raw: impl Into<String>) -> Result<Self, PostTitleError> {
        let trimmed = raw.into().trim().to_string();

        if trimmed.is_empty() {
            return Err(PostTitleError::Blank);
        }

        if trimmed.chars().count() > POST_TITLE_MAX_LENGTH {
            return Err(PostTitleError::TooLong);
        }

        Ok(Self(trimmed))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
