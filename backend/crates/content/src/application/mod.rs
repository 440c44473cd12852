//! Application Layer
//!
//! Use cases.

pub mod comments;
pub mod config;
pub mod posts;

// Re-exports
pub use comments::{
    CommentInput, CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase,
    ListCommentsUseCase, UpdateCommentUseCase,
};
pub use config::ContentConfig;
pub use posts::{
    CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsInput, ListPostsUseCase,
    MyPostsUseCase, PostDetail, PostInput, UpdatePostUseCase,
};
