//! API DTOs (Data Transfer Objects)
//!
//! Wire format is snake_case; timestamps keep their historical field
//! names (`created_on`, `updated_on`) for client compatibility. The
//! author is always derived server-side and appears in responses as the
//! username.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::posts::PostDetail;
use crate::domain::entities::{Category, CommentView, PostView};

// ============================================================================
// Requests
// ============================================================================

/// Nested category payload: `{"name": "django"}`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPayload {
    pub name: Option<String>,
}

/// Post create/update request (note: no author field exists here)
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub categories: Option<Vec<CategoryPayload>>,
}

impl PostRequest {
    /// Flatten the nested category payloads to plain names
    pub fn category_names(&self) -> Option<Vec<String>> {
        self.categories.as_ref().map(|categories| {
            categories
                .iter()
                .map(|c| c.name.clone().unwrap_or_default())
                .collect()
        })
    }
}

/// Comment create/update request
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: Option<String>,
}

/// Public listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    pub author: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

// ============================================================================
// Responses
// ============================================================================

/// Category in responses
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl CategoryResponse {
    fn from_category(category: &Category) -> Self {
        Self {
            id: *category.category_id.as_uuid(),
            name: category.name.as_str().to_string(),
        }
    }
}

/// Comment in responses
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub author: String,
    pub created_on: DateTime<Utc>,
}

impl CommentResponse {
    pub fn from_view(view: &CommentView) -> Self {
        Self {
            id: *view.comment.comment_id.as_uuid(),
            content: view.comment.content.clone(),
            author: view.author_username.clone(),
            created_on: view.comment.created_at,
        }
    }
}

/// Full post representation (single-item and authenticated views)
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    pub categories: Vec<CategoryResponse>,
    pub comments: Vec<CommentResponse>,
}

impl PostResponse {
    pub fn from_view(view: &PostView, comments: &[CommentView]) -> Self {
        Self {
            id: *view.post.post_id.as_uuid(),
            title: view.post.title.as_str().to_string(),
            body: view.post.body.clone(),
            author: view.author_username.clone(),
            categories: view
                .categories
                .iter()
                .map(CategoryResponse::from_category)
                .collect(),
            comments: comments.iter().map(CommentResponse::from_view).collect(),
        }
    }

    pub fn from_detail(detail: &PostDetail) -> Self {
        Self::from_view(&detail.view, &detail.comments)
    }
}

/// Compact post representation for the public listing
#[derive(Debug, Clone, Serialize)]
pub struct PostListItem {
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl PostListItem {
    pub fn from_view(view: &PostView) -> Self {
        Self {
            title: view.post.title.as_str().to_string(),
            body: view.post.body.clone(),
            author: view.author_username.clone(),
            created_on: view.post.created_at,
            updated_on: view.post.updated_at,
        }
    }
}
