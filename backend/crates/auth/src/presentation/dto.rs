//! API DTOs (Data Transfer Objects)
//!
//! Wire format is snake_case. Registration/login fields are optional so
//! missing fields surface as field-keyed validation errors.

use serde::{Deserialize, Serialize};

// ============================================================================
// Register
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Registration response (never includes the password)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub status: bool,
    pub access: String,
    pub refresh: String,
}

// ============================================================================
// Refresh
// ============================================================================

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub status: bool,
    pub access: String,
}
