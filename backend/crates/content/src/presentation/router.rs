//! Content Routers
//!
//! Two routers: the public read-only listing and the bearer-guarded
//! rest. The guard comes from the auth crate and is applied here so a
//! protected route can never ship without it.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use auth::presentation::middleware::{BearerAuthState, require_bearer_auth};

use crate::domain::index::SearchIndex;
use crate::domain::repository::ContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Public read-only routes (no identity required)
pub fn content_router_public<R, I>(state: ContentAppState<R, I>) -> Router
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    Router::new()
        .route("/posts", get(handlers::list_posts::<R, I>))
        .with_state(state)
}

/// Bearer-guarded routes
pub fn content_router_protected<R, I>(
    state: ContentAppState<R, I>,
    auth: BearerAuthState,
) -> Router
where
    R: ContentRepository + Send + Sync + 'static,
    I: SearchIndex + Send + Sync + 'static,
{
    Router::new()
        .route("/posts", post(handlers::create_post::<R, I>))
        .route("/posts/mine", get(handlers::my_posts::<R, I>))
        .route(
            "/posts/{post_id}",
            get(handlers::get_post::<R, I>)
                .put(handlers::update_post::<R, I>)
                .delete(handlers::delete_post::<R, I>),
        )
        .route(
            "/posts/{post_id}/comments",
            get(handlers::list_comments::<R, I>).post(handlers::create_comment::<R, I>),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            get(handlers::get_comment::<R, I>)
                .put(handlers::update_comment::<R, I>)
                .delete(handlers::delete_comment::<R, I>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_bearer_auth))
        .with_state(state)
}
