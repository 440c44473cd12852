//! HTTP Handlers
//!
//! Handlers on protected routes receive the acting identity as a
//! request extension inserted by the auth crate's bearer middleware.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use uuid::Uuid;

use auth::presentation::middleware::CurrentUser;
use kernel::id::{CommentId, PostId, UserId};

use crate::application::config::ContentConfig;
use crate::application::{
    CommentInput, CreateCommentUseCase, CreatePostUseCase, DeleteCommentUseCase,
    DeletePostUseCase, GetCommentUseCase, GetPostUseCase, ListCommentsUseCase, ListPostsInput,
    ListPostsUseCase, MyPostsUseCase, PostInput, UpdateCommentUseCase, UpdatePostUseCase,
};
use crate::domain::index::SearchIndex;
use crate::domain::repository::ContentRepository;
use crate::error::ContentResult;
use crate::presentation::dto::{
    CommentRequest, CommentResponse, ListPostsQuery, PostListItem, PostRequest, PostResponse,
};

/// Shared state for content handlers
pub struct ContentAppState<R, I>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub index: Arc<I>,
    pub config: Arc<ContentConfig>,
}

impl<R, I> Clone for ContentAppState<R, I>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            index: self.index.clone(),
            config: self.config.clone(),
        }
    }
}

fn acting_id(current: &CurrentUser) -> UserId {
    UserId::from_uuid(current.user_id)
}

// ============================================================================
// Posts - public
// ============================================================================

/// GET /api/posts
pub async fn list_posts<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Query(query): Query<ListPostsQuery>,
) -> ContentResult<Json<Vec<PostListItem>>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.config.clone());

    let views = use_case
        .execute(ListPostsInput {
            author: query.author,
            category: query.category,
            page: query.page,
            page_size: query.page_size,
        })
        .await?;

    Ok(Json(views.iter().map(PostListItem::from_view).collect()))
}

// ============================================================================
// Posts - authenticated
// ============================================================================

/// POST /api/posts
pub async fn create_post<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<PostRequest>,
) -> ContentResult<(StatusCode, Json<PostResponse>)>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone(), state.index.clone());

    let input = PostInput {
        title: req.title.clone(),
        body: req.body.clone(),
        categories: req.category_names(),
    };

    let view = use_case.execute(acting_id(&current), input).await?;

    // A freshly created post has no comments
    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_view(&view, &[])),
    ))
}

/// GET /api/posts/mine
pub async fn my_posts<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
) -> ContentResult<Json<Vec<PostResponse>>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = MyPostsUseCase::new(state.repo.clone());

    let details = use_case.execute(acting_id(&current)).await?;

    Ok(Json(details.iter().map(PostResponse::from_detail).collect()))
}

/// GET /api/posts/{post_id}
pub async fn get_post<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Path(post_id): Path<Uuid>,
) -> ContentResult<Json<PostResponse>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = GetPostUseCase::new(state.repo.clone());

    let detail = use_case.execute(PostId::from_uuid(post_id)).await?;

    Ok(Json(PostResponse::from_detail(&detail)))
}

/// PUT /api/posts/{post_id}
pub async fn update_post<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<PostRequest>,
) -> ContentResult<Json<PostResponse>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = UpdatePostUseCase::new(state.repo.clone(), state.index.clone());

    let input = PostInput {
        title: req.title.clone(),
        body: req.body.clone(),
        categories: req.category_names(),
    };

    let detail = use_case
        .execute(acting_id(&current), PostId::from_uuid(post_id), input)
        .await?;

    Ok(Json(PostResponse::from_detail(&detail)))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<Uuid>,
) -> ContentResult<StatusCode>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone(), state.index.clone());

    use_case
        .execute(acting_id(&current), PostId::from_uuid(post_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments - authenticated
// ============================================================================

/// GET /api/posts/{post_id}/comments
pub async fn list_comments<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Path(post_id): Path<Uuid>,
) -> ContentResult<Json<Vec<CommentResponse>>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = ListCommentsUseCase::new(state.repo.clone());

    let views = use_case.execute(PostId::from_uuid(post_id)).await?;

    Ok(Json(views.iter().map(CommentResponse::from_view).collect()))
}

/// POST /api/posts/{post_id}/comments
pub async fn create_comment<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> ContentResult<(StatusCode, Json<CommentResponse>)>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = CreateCommentUseCase::new(state.repo.clone());

    let view = use_case
        .execute(
            acting_id(&current),
            PostId::from_uuid(post_id),
            CommentInput {
                content: req.content,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::from_view(&view)),
    ))
}

/// GET /api/posts/{post_id}/comments/{comment_id}
pub async fn get_comment<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> ContentResult<Json<CommentResponse>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = GetCommentUseCase::new(state.repo.clone());

    let view = use_case
        .execute(PostId::from_uuid(post_id), CommentId::from_uuid(comment_id))
        .await?;

    Ok(Json(CommentResponse::from_view(&view)))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update_comment<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<CommentRequest>,
) -> ContentResult<Json<CommentResponse>>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = UpdateCommentUseCase::new(state.repo.clone());

    let view = use_case
        .execute(
            acting_id(&current),
            PostId::from_uuid(post_id),
            CommentId::from_uuid(comment_id),
            CommentInput {
                content: req.content,
            },
        )
        .await?;

    Ok(Json(CommentResponse::from_view(&view)))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment<R, I>(
    State(state): State<ContentAppState<R, I>>,
    Extension(current): Extension<CurrentUser>,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> ContentResult<StatusCode>
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    let use_case = DeleteCommentUseCase::new(state.repo.clone());

    use_case
        .execute(
            acting_id(&current),
            PostId::from_uuid(post_id),
            CommentId::from_uuid(comment_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
