//! Credentials Entity
//!
//! Sensitive authentication data, kept apart from the user profile.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

/// Stored credentials for one user
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Owning user
    pub user_id: UserId,
    /// Argon2id password hash (PHC format)
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credentials {
    /// Create credentials for a user
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
