//! User Name Value Object
//!
//! ユーザー名は、ユーザーを識別するための**公開識別子（ハンドル）**。
//! 画面表示、投稿の著者フィルタ、管理運用に使用される。
//!
//! ## 設計方針
//! - 許可文字: 英数字と `@ . + - _`
//! - 大文字入力は受け付けるが、canonical（正規形）は小文字
//! - NFKC正規化 → 検証 → 小文字化 の順で処理
//!
//! ## 不変条件
//! - 長さ: 1〜150文字（正規化後）
//! - 空白のみは不可
//! - canonical は大文字小文字を無視した一意性・照合に使用

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for a user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed special characters in a user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

// ============================================================================
// Error Types
// ============================================================================

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    /// Empty or whitespace-only
    #[error("User name may not be blank")]
    Blank,

    /// Too long after normalization
    #[error("User name must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,

    /// Contains a character outside the allowed set
    #[error("User name may contain only letters, numbers, and @/./+/-/_ characters")]
    InvalidCharacter,
}

// ============================================================================
// User Name
// ============================================================================

/// User name value object
///
/// Keeps the original casing for display and a lowercase canonical form
/// for uniqueness and case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new user name with validation
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let normalized: String = raw.into().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Blank);
        }

        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }

        for ch in trimmed.chars() {
            if !ch.is_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(UserNameError::InvalidCharacter);
            }
        }

        Ok(Self {
            original: trimmed.to_string(),
            canonical: trimmed.to_lowercase(),
        })
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// The name as entered (display form)
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase canonical form (uniqueness and matching)
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(UserName::new("janedoe").is_ok());
        assert!(UserName::new("jane.doe").is_ok());
        assert!(UserName::new("jane_doe-99").is_ok());
        assert!(UserName::new("jane+doe@host").is_ok());
    }

    #[test]
    fn test_blank_rejected() {
        assert_eq!(UserName::new(""), Err(UserNameError::Blank));
        assert_eq!(UserName::new("   "), Err(UserNameError::Blank));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert_eq!(UserName::new(long), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert_eq!(
            UserName::new("jane doe"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(
            UserName::new("jane#doe"),
            Err(UserNameError::InvalidCharacter)
        );
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("JaneDoe").unwrap();
        assert_eq!(name.original(), "JaneDoe");
        assert_eq!(name.canonical(), "janedoe");
    }
}
