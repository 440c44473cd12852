//! Repository Trait
//!
//! Interface for content persistence. Implementation is in the
//! infrastructure layer.

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entities::{Comment, CommentView, Post, PostView};
use crate::domain::value_objects::CategoryName;
use crate::error::ContentResult;

/// Filters and pagination for the public post listing
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Case-insensitive exact username match (pass the canonical form)
    pub author: Option<String>,
    /// Case-insensitive contains-match on category name
    pub category: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Content repository trait
#[trait_variant::make(ContentRepository: Send)]
pub trait LocalContentRepository {
    /// Persist a new post; categories are resolved get-or-create by
    /// normalized name (the store's unique constraint settles races)
    async fn create_post(&self, post: &Post, categories: &[CategoryName])
    -> ContentResult<PostView>;

    /// Persist post edits; `Some(categories)` replaces the category set
    async fn update_post(
        &self,
        post: &Post,
        categories: Option<&[CategoryName]>,
    ) -> ContentResult<PostView>;

    /// Delete a post
    async fn delete_post(&self, post_id: &PostId) -> ContentResult<()>;

    /// Find one post with author and categories
    async fn find_post(&self, post_id: &PostId) -> ContentResult<Option<PostView>>;

    /// List posts matching `query`, newest first
    async fn list_posts(&self, query: &PostQuery) -> ContentResult<Vec<PostView>>;

    /// Count posts matching `query` (ignores pagination)
    async fn count_posts(&self, query: &PostQuery) -> ContentResult<i64>;

    /// List one author's posts, newest first
    async fn list_posts_by_user(&self, author_id: &UserId) -> ContentResult<Vec<PostView>>;

    /// Persist a new comment
    async fn create_comment(&self, comment: &Comment) -> ContentResult<CommentView>;

    /// Find a comment scoped to its post
    async fn find_comment(
        &self,
        post_id: &PostId,
        comment_id: &CommentId,
    ) -> ContentResult<Option<CommentView>>;

    /// List a post's comments, newest first
    async fn list_comments(&self, post_id: &PostId) -> ContentResult<Vec<CommentView>>;

    /// Persist comment edits
    async fn update_comment(&self, comment: &Comment) -> ContentResult<CommentView>;

    /// Delete a comment
    async fn delete_comment(&self, comment_id: &CommentId) -> ContentResult<()>;
}
