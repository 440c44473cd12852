//! Comment Use Cases
//!
//! A comment id must belong to the addressed post, or the lookup fails
//! with not-found before any ownership question is asked. Update and
//! delete are then owner-only.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entities::{Comment, CommentView};
use crate::domain::repository::ContentRepository;
use crate::error::{ContentError, ContentResult};

const MSG_REQUIRED: &str = "This field is required.";
const MSG_BLANK: &str = "This field may not be blank.";

/// Comment submission
#[derive(Debug, Clone, Default)]
pub struct CommentInput {
    pub content: Option<String>,
}

// ============================================================================
// Create
// ============================================================================

/// Create comment use case
pub struct CreateCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCommentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        author_id: UserId,
        post_id: PostId,
        input: CommentInput,
    ) -> ContentResult<CommentView> {
        // The parent post must exist first
        self.repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let content = validate_content(input)?;

        // The acting identity is the author, unconditionally
        let comment = Comment::new(post_id, author_id, content);

        let view = self.repo.create_comment(&comment).await?;

        tracing::info!(
            comment_id = %view.comment.comment_id,
            post_id = %post_id,
            "Comment created"
        );

        Ok(view)
    }
}

// ============================================================================
// List / Retrieve
// ============================================================================

/// List a post's comments
pub struct ListCommentsUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> ListCommentsUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: PostId) -> ContentResult<Vec<CommentView>> {
        self.repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        self.repo.list_comments(&post_id).await
    }
}

/// Retrieve one comment, scoped to its post
pub struct GetCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> GetCommentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ContentResult<CommentView> {
        self.repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        self.repo
            .find_comment(&post_id, &comment_id)
            .await?
            .ok_or(ContentError::CommentNotFound)
    }
}

// ============================================================================
// Update
// ============================================================================

/// Update comment use case
pub struct UpdateCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateCommentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        acting: UserId,
        post_id: PostId,
        comment_id: CommentId,
        input: CommentInput,
    ) -> ContentResult<CommentView> {
        self.repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let existing = self
            .repo
            .find_comment(&post_id, &comment_id)
            .await?
            .ok_or(ContentError::CommentNotFound)?;

        if !existing.comment.is_owned_by(&acting) {
            return Err(ContentError::CommentUpdateForbidden);
        }

        let content = validate_content(input)?;

        let mut comment = existing.comment;
        comment.edit(content);

        self.repo.update_comment(&comment).await
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Delete comment use case
pub struct DeleteCommentUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCommentUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        acting: UserId,
        post_id: PostId,
        comment_id: CommentId,
    ) -> ContentResult<()> {
        self.repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let existing = self
            .repo
            .find_comment(&post_id, &comment_id)
            .await?
            .ok_or(ContentError::CommentNotFound)?;

        if !existing.comment.is_owned_by(&acting) {
            return Err(ContentError::CommentDeleteForbidden);
        }

        self.repo.delete_comment(&comment_id).await?;

        tracing::info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted");

        Ok(())
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_content(input: CommentInput) -> ContentResult<String> {
    let mut errors = FieldErrors::new();

    let content = match &input.content {
        None => {
            errors.add("content", MSG_REQUIRED);
            None
        }
        Some(raw) if raw.trim().is_empty() => {
            errors.add("content", MSG_BLANK);
            None
        }
        Some(raw) => Some(raw.trim().to_string()),
    };

    match content {
        Some(content) if errors.is_empty() => Ok(content),
        _ => Err(ContentError::Validation(errors)),
    }
}
