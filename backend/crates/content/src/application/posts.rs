//! Post Use Cases
//!
//! Creation stamps the acting identity as author unconditionally.
//! Update and delete are owner-only; a non-owner gets a forbidden
//! answer, distinct from the not-found answer for an absent post. Every
//! successful create/update/delete ends with the search-index hook,
//! whose failures never propagate.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;
use kernel::id::{PostId, UserId};

use crate::application::config::ContentConfig;
use crate::domain::entities::{CommentView, Post, PostView};
use crate::domain::index::{IndexHook, SearchIndex};
use crate::domain::repository::{ContentRepository, PostQuery};
use crate::domain::value_objects::{
    CATEGORY_NAME_MAX_LENGTH, CategoryName, CategoryNameError, POST_TITLE_MAX_LENGTH, PostTitle,
    PostTitleError,
};
use crate::error::{ContentError, ContentResult};

const MSG_REQUIRED: &str = "This field is required.";
const MSG_BLANK: &str = "This field may not be blank.";

/// Post submission (create and update share the shape)
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Validated post submission
struct ValidatedPost {
    title: PostTitle,
    body: String,
    categories: Vec<CategoryName>,
}

/// Public listing input
#[derive(Debug, Clone, Default)]
pub struct ListPostsInput {
    pub author: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Post with its comments (single-post retrieval)
#[derive(Debug)]
pub struct PostDetail {
    pub view: PostView,
    pub comments: Vec<CommentView>,
}

// ============================================================================
// Create
// ============================================================================

/// Create post use case
pub struct CreatePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    repo: Arc<R>,
    hook: IndexHook<I>,
}

impl<R, I> CreatePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    pub fn new(repo: Arc<R>, index: Arc<I>) -> Self {
        Self {
            repo,
            hook: IndexHook::new(index),
        }
    }

    pub async fn execute(&self, author_id: UserId, input: PostInput) -> ContentResult<PostView> {
        let validated = validate_post_input(input)?;

        // The acting identity is the author; nothing the client sends
        // can change that
        let post = Post::new(validated.title, validated.body, author_id);

        let view = self.repo.create_post(&post, &validated.categories).await?;

        self.hook.post_saved(&view).await;

        tracing::info!(post_id = %view.post.post_id, author = %view.author_username, "Post created");

        Ok(view)
    }
}

// ============================================================================
// Update
// ============================================================================

/// Update post use case
pub struct UpdatePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    repo: Arc<R>,
    hook: IndexHook<I>,
}

impl<R, I> UpdatePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    pub fn new(repo: Arc<R>, index: Arc<I>) -> Self {
        Self {
            repo,
            hook: IndexHook::new(index),
        }
    }

    pub async fn execute(
        &self,
        acting: UserId,
        post_id: PostId,
        input: PostInput,
    ) -> ContentResult<PostDetail> {
        let existing = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !existing.post.is_owned_by(&acting) {
            return Err(ContentError::PostForbidden);
        }

        let validated = validate_post_input(input)?;

        let mut post = existing.post;
        post.edit(validated.title, validated.body);

        let view = self
            .repo
            .update_post(&post, Some(&validated.categories))
            .await?;

        self.hook.post_saved(&view).await;

        let comments = self.repo.list_comments(&post_id).await?;

        Ok(PostDetail { view, comments })
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Delete post use case
pub struct DeletePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    repo: Arc<R>,
    hook: IndexHook<I>,
}

impl<R, I> DeletePostUseCase<R, I>
where
    R: ContentRepository,
    I: SearchIndex + Sync,
{
    pub fn new(repo: Arc<R>, index: Arc<I>) -> Self {
        Self {
            repo,
            hook: IndexHook::new(index),
        }
    }

    pub async fn execute(&self, acting: UserId, post_id: PostId) -> ContentResult<()> {
        let existing = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !existing.post.is_owned_by(&acting) {
            return Err(ContentError::PostForbidden);
        }

        self.repo.delete_post(&post_id).await?;

        self.hook.post_deleted(&post_id).await;

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}

// ============================================================================
// Retrieve
// ============================================================================

/// Single-post retrieval use case (with comments)
pub struct GetPostUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> GetPostUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: PostId) -> ContentResult<PostDetail> {
        let view = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let comments = self.repo.list_comments(&post_id).await?;

        Ok(PostDetail { view, comments })
    }
}

// ============================================================================
// Public listing
// ============================================================================

/// Public post listing use case
pub struct ListPostsUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
    config: Arc<ContentConfig>,
}

impl<R> ListPostsUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ContentConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ListPostsInput) -> ContentResult<Vec<PostView>> {
        let page = input.page.unwrap_or(1).max(1);
        let page_size = input
            .page_size
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);

        let author = input
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty());
        let category = input
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let query = PostQuery {
            author: author.map(str::to_lowercase),
            category: category.map(str::to_lowercase),
            limit: i64::from(page_size),
            offset: i64::from(page_size) * i64::from(page - 1),
        };

        // An author filter that matches nothing is a 404 naming the
        // author, not an empty list
        if let Some(author) = author {
            let total = self
                .repo
                .count_posts(&PostQuery {
                    author: query.author.clone(),
                    category: None,
                    ..PostQuery::default()
                })
                .await?;
            if total == 0 {
                return Err(ContentError::NoPostsForAuthor(author.to_string()));
            }
        }

        self.repo.list_posts(&query).await
    }
}

// ============================================================================
// Own posts
// ============================================================================

/// Listing of the acting identity's own posts
pub struct MyPostsUseCase<R>
where
    R: ContentRepository,
{
    repo: Arc<R>,
}

impl<R> MyPostsUseCase<R>
where
    R: ContentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, author_id: UserId) -> ContentResult<Vec<PostDetail>> {
        let views = self.repo.list_posts_by_user(&author_id).await?;

        let mut details = Vec::with_capacity(views.len());
        for view in views {
            let comments = self.repo.list_comments(&view.post.post_id).await?;
            details.push(PostDetail { view, comments });
        }

        Ok(details)
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_post_input(input: PostInput) -> ContentResult<ValidatedPost> {
    let mut errors = FieldErrors::new();

    let title = match &input.title {
        None => {
            errors.add("title", MSG_REQUIRED);
            None
        }
        Some(raw) => match PostTitle::new(raw.clone()) {
            Ok(title) => Some(title),
            Err(PostTitleError::Blank) => {
                errors.add("title", MSG_BLANK);
                None
            }
            Err(PostTitleError::TooLong) => {
                errors.add(
                    "title",
                    format!(
                        "Ensure this field has no more than {} characters.",
                        POST_TITLE_MAX_LENGTH
                    ),
                );
                None
            }
        },
    };

    let body = match &input.body {
        None => {
            errors.add("body", MSG_REQUIRED);
            None
        }
        Some(raw) if raw.trim().is_empty() => {
            errors.add("body", MSG_BLANK);
            None
        }
        Some(raw) => Some(raw.trim().to_string()),
    };

    let categories = match &input.categories {
        None => {
            errors.add("categories", MSG_REQUIRED);
            None
        }
        Some(names) => {
            let mut resolved = Vec::with_capacity(names.len());
            for name in names {
                match CategoryName::new(name.clone()) {
                    // Case-variant duplicates collapse to one entry
                    Ok(category) if resolved.contains(&category) => {}
                    Ok(category) => resolved.push(category),
                    Err(CategoryNameError::Blank) => {
                        errors.add("categories", MSG_BLANK);
                    }
                    Err(CategoryNameError::TooLong) => {
                        errors.add(
                            "categories",
                            format!(
                                "Ensure this field has no more than {} characters.",
                                CATEGORY_NAME_MAX_LENGTH
                            ),
                        );
                    }
                }
            }
            Some(resolved)
        }
    };

    if !errors.is_empty() {
        return Err(ContentError::Validation(errors));
    }

    let (Some(title), Some(body), Some(categories)) = (title, body, categories) else {
        return Err(ContentError::Internal(
            "Post validation passed but a value is missing".to_string(),
        ));
    };

    Ok(ValidatedPost {
        title,
        body,
        categories,
    })
}
