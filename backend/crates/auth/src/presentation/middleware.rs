//! Auth Middleware
//!
//! Middleware for requiring a bearer access token on protected routes.
//! On success the acting identity is inserted as a request extension for
//! downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct BearerAuthState {
    pub config: Arc<AuthConfig>,
}

/// The acting identity resolved from the access token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Middleware that requires a valid bearer access token
///
/// Refresh tokens are rejected here; only access tokens authenticate
/// requests.
pub async fn require_bearer_auth(
    State(state): State<BearerAuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| AuthError::TokenMissing.into_response())?;

    let issuer = TokenIssuer::new(state.config.clone());

    let claims = issuer
        .verify_access(&token)
        .map_err(|_| AuthError::TokenInvalid.into_response())?;

    let user_id = claims
        .user_id()
        .map_err(|_| AuthError::TokenInvalid.into_response())?;

    req.extensions_mut().insert(CurrentUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
