//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, RefreshInput, RefreshUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::notification::LoginNotifier;
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    RegisterResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, N>
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<AuthConfig>,
}

impl<R, N> Clone for AuthAppState<R, N>
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            notifier: self.notifier.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };

    let output = use_case.execute(input).await?;
    let user = output.user;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            username: user.username.original().to_string(),
            email: user.email.as_str().to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        status: true,
        access: output.tokens.access,
        refresh: output.tokens.refresh,
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RefreshRequest>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: UserRepository + CredentialsRepository + Send + Sync + 'static,
    N: LoginNotifier + 'static,
{
    let use_case = RefreshUseCase::new(state.config.clone());

    let output = use_case.execute(RefreshInput {
        refresh: req.refresh,
    })?;

    Ok(Json(RefreshResponse {
        status: true,
        access: output.access,
    }))
}
