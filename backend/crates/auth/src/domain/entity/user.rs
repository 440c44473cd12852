//! User Entity
//!
//! Core user profile entity containing non-sensitive user data.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, person_name::PersonName, user_name::UserName};

/// User entity
///
/// Contains the public user profile. The hashed secret lives in the
/// separate Credentials entity.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique case-insensitively, used for display and the
    /// public author filter)
    pub username: UserName,
    /// Email address (unique, used for login)
    pub email: Email,
    /// Given name
    pub first_name: PersonName,
    /// Family name
    pub last_name: PersonName,
    /// Whether the account may log in
    pub is_active: bool,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        username: UserName,
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            username,
            email,
            first_name,
            last_name,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}
