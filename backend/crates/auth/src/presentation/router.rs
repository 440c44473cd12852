//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::notification::LoginNotifier;
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::infra::notify::MailQueue;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL repository and mail queue
pub fn auth_router(repo: PgAuthRepository, notifier: MailQueue, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), Arc::new(notifier), config)
}

/// Create a generic Auth router for any repository/notifier implementation
pub fn auth_router_generic<R, N>(repo: Arc<R>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    let state = AuthAppState {
        repo,
        notifier,
        config,
    };

    Router::new()
        .route("/register", post(handlers::register::<R, N>))
        .route("/login", post(handlers::login::<R, N>))
        .route("/refresh", post(handlers::refresh::<R, N>))
        .with_state(state)
}
