//! Search Index Port
//!
//! Post-commit synchronization hook for the external search index. The
//! content store invokes the hook after every successful post
//! create/update/delete; the hook catches and logs every failure, so
//! index trouble never reaches the caller that triggered the save.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use kernel::id::PostId;

use crate::domain::entities::PostView;

/// Document shape pushed to the search index
#[derive(Debug, Clone, Serialize)]
pub struct PostDocument {
    pub id: Uuid,
    pub title: String,
    pub categories: Vec<CategoryRef>,
}

/// Category reference embedded in a post document
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

impl PostDocument {
    /// Build the index document from a hydrated post
    pub fn from_view(view: &PostView) -> Self {
        Self {
            id: *view.post.post_id.as_uuid(),
            title: view.post.title.as_str().to_string(),
            categories: view
                .categories
                .iter()
                .map(|c| CategoryRef {
                    id: *c.category_id.as_uuid(),
                    name: c.name.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// Index synchronization errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not be reached or refused the request
    #[error("Search index unavailable: {0}")]
    Unavailable(String),

    /// The index rejected the document
    #[error("Search index rejected the request with status {0}")]
    Rejected(u16),
}

/// Search index port
#[trait_variant::make(SearchIndex: Send)]
pub trait LocalSearchIndex {
    /// Create or replace the document for a post
    async fn upsert(&self, document: &PostDocument) -> Result<(), IndexError>;

    /// Remove the document for a deleted post
    async fn remove(&self, post_id: &PostId) -> Result<(), IndexError>;
}

/// Catching wrapper around the index port
///
/// All failures terminate here: logged with the post id, never
/// propagated.
pub struct IndexHook<I>
where
    I: SearchIndex + Sync,
{
    index: std::sync::Arc<I>,
}

impl<I> IndexHook<I>
where
    I: SearchIndex + Sync,
{
    pub fn new(index: std::sync::Arc<I>) -> Self {
        Self { index }
    }

    /// Invoked after a successful post create/update
    pub async fn post_saved(&self, view: &PostView) {
        let document = PostDocument::from_view(view);
        if let Err(e) = self.index.upsert(&document).await {
            tracing::error!(
                post_id = %view.post.post_id,
                error = %e,
                "Failed to update search index document"
            );
        }
    }

    /// Invoked after a successful post delete
    pub async fn post_deleted(&self, post_id: &PostId) {
        if let Err(e) = self.index.remove(post_id).await {
            tracing::error!(
                post_id = %post_id,
                error = %e,
                "Failed to delete search index document"
            );
        }
    }
}
