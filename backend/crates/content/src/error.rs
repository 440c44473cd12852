//! Content Error Types
//!
//! Content-specific error variants. Ownership violations and the
//! author-filter miss carry the exact wire bodies the public API
//! defines; everything else renders through `kernel::AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Malformed or incomplete input, reported per field
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Referenced post does not exist
    #[error("Post not found")]
    PostNotFound,

    /// Referenced comment does not exist under the addressed post
    #[error("Comment not found")]
    CommentNotFound,

    /// Author filter matched no posts - deliberately a 404 with a
    /// descriptive body, not an empty success list
    #[error("No posts found for author {0}")]
    NoPostsForAuthor(String),

    /// Acting identity is not the post's author
    #[error("You are not allowed to modify this post.")]
    PostForbidden,

    /// Acting identity is not the comment's author (update)
    #[error("You are not allowed to update this comment.")]
    CommentUpdateForbidden,

    /// Acting identity is not the comment's author (delete)
    #[error("You are not allowed to delete this comment.")]
    CommentDeleteForbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentError::Validation(_) => StatusCode::BAD_REQUEST,
            ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::NoPostsForAuthor(_) => StatusCode::NOT_FOUND,
            ContentError::PostForbidden
            | ContentError::CommentUpdateForbidden
            | ContentError::CommentDeleteForbidden => StatusCode::FORBIDDEN,
            ContentError::Database(_) | ContentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Validation(_) => ErrorKind::BadRequest,
            ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::NoPostsForAuthor(_) => ErrorKind::NotFound,
            ContentError::PostForbidden
            | ContentError::CommentUpdateForbidden
            | ContentError::CommentDeleteForbidden => ErrorKind::Forbidden,
            ContentError::Database(_) | ContentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::PostForbidden
            | ContentError::CommentUpdateForbidden
            | ContentError::CommentDeleteForbidden => {
                tracing::warn!(error = %self, "Ownership violation rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            ContentError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ContentError::PostNotFound | ContentError::CommentNotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": "Not found." })),
            )
                .into_response(),
            err @ ContentError::NoPostsForAuthor(_) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": err.to_string() })),
            )
                .into_response(),
            err @ (ContentError::PostForbidden
            | ContentError::CommentUpdateForbidden
            | ContentError::CommentDeleteForbidden) => (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({ "error": err.to_string() })),
            )
                .into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for ContentError {
    fn from(err: AppError) -> Self {
        ContentError::Internal(err.to_string())
    }
}
