//! Content Backend Module
//!
//! Posts, comments, and categories with author-only ownership on
//! mutation and a post-commit search-index hook.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait, index port
//! - `application/` - Use cases
//! - `infra/` - Database implementation, search-index client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Ownership Model
//! - A post or comment is bound to its author at creation, forever
//! - Mutation is owner-only; violations answer 403, distinct from 404
//! - Creation stamps the acting identity; clients cannot choose authors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use infra::postgres::PgContentRepository;
pub use infra::search::SearchIndexClient;
pub use presentation::router::{content_router_protected, content_router_public};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgContentRepository as ContentStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
