//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Validation and
//! login failures carry their own wire shapes (field-keyed map and the
//! opaque `{status, detail}` body); everything else renders through
//! `AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or incomplete input, reported per field
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Bad credentials - deliberately opaque, unknown account and wrong
    /// password are indistinguishable
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// No access token on a protected request
    #[error("Missing access token")]
    TokenMissing,

    /// Access token failed verification (signature, expiry, or token use)
    #[error("Invalid or expired access token")]
    TokenInvalid,

    /// Username unique constraint hit at the store
    #[error("A user with that username already exists")]
    UsernameTaken,

    /// Email unique constraint hit at the store
    #[error("A user with this email already exists")]
    EmailTaken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            // The original API answers 404 for bad credentials; preserved
            AuthError::AuthenticationFailed => StatusCode::NOT_FOUND,
            AuthError::TokenMissing | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::AuthenticationFailed => ErrorKind::NotFound,
            AuthError::TokenMissing | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::AuthenticationFailed => {
                tracing::warn!("Failed login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::debug!("Rejected invalid access token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            AuthError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AuthError::AuthenticationFailed => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "status": false,
                    "detail": "Authentication failed",
                })),
            )
                .into_response(),
            AuthError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "detail": "Authentication credentials were not provided.",
                })),
            )
                .into_response(),
            AuthError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "detail": "Given token not valid for any token type",
                })),
            )
                .into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(e) => AuthError::Internal(format!("Token encoding failed: {e}")),
            _ => AuthError::TokenInvalid,
        }
    }
}
