//! Content Entities and Read Models

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, CommentId, PostId, UserId};

use crate::domain::value_objects::{CategoryName, PostTitle};

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    /// Normalized (lowercase) name, unique
    pub name: CategoryName,
}

impl Category {
    pub fn new(name: CategoryName) -> Self {
        Self {
            category_id: CategoryId::new(),
            name,
        }
    }
}

/// Post entity
///
/// The author is fixed at creation and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub title: PostTitle,
    pub body: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `author_id`
    pub fn new(title: PostTitle, body: String, author_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            title,
            body,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` is the owning author
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }

    /// Replace title and body
    pub fn edit(&mut self, title: PostTitle, body: String) {
        self.title = title;
        self.body = body;
        self.updated_at = Utc::now();
    }
}

/// Comment entity
///
/// Belongs to exactly one post and one author, both immutable.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on `post_id` owned by `author_id`
    pub fn new(post_id: PostId, author_id: UserId, content: String) -> Self {
        let now = Utc::now();

        Self {
            comment_id: CommentId::new(),
            post_id,
            author_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user_id` is the owning author
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.author_id == *user_id
    }

    /// Replace the content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

// ============================================================================
// Read models
// ============================================================================

/// A post hydrated with its author's username and categories
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author_username: String,
    pub categories: Vec<Category>,
}

/// A comment hydrated with its author's username
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_ownership() {
        let author = UserId::new();
        let other = UserId::new();
        let post = Post::new(
            PostTitle::new("Introduction to Django").unwrap(),
            "This is a post about Django".to_string(),
            author,
        );

        assert!(post.is_owned_by(&author));
        assert!(!post.is_owned_by(&other));
    }

    #[test]
    fn test_comment_belongs_to_post_and_author() {
        let author = UserId::new();
        let post_id = PostId::new();
        let comment = Comment::new(post_id, author, "Django is fun".to_string());

        assert_eq!(comment.post_id, post_id);
        assert!(comment.is_owned_by(&author));
    }

    #[test]
    fn test_post_edit_touches_updated_at() {
        let mut post = Post::new(
            PostTitle::new("Old title").unwrap(),
            "old".to_string(),
            UserId::new(),
        );
        let created = post.created_at;

        post.edit(PostTitle::new("New title").unwrap(), "new".to_string());

        assert_eq!(post.title.as_str(), "New title");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= created);
    }
}
