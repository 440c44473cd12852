//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations and the mail queue
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - User registration with field-scoped validation
//! - Email + password login issuing a signed access/refresh token pair
//! - Fire-and-forget thank-you mail on successful login
//! - Bearer-token middleware resolving the acting identity
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in plaintext
//! - Unknown account and wrong password are indistinguishable to callers
//! - Tokens are HS256-signed, stateless, and expiry-bound

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{TokenIssuer, TokenPair};
pub use error::{AuthError, AuthResult};
pub use infra::notify::MailQueue;
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{BearerAuthState, CurrentUser, require_bearer_auth};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    field_errors::FieldErrors,
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
