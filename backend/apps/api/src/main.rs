//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, MailQueue, PgAuthRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use content::{
    ContentConfig, PgContentRepository, SearchIndexClient, content_router_protected,
    content_router_public,
};
use platform::mailer::MailTransport;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::presentation::middleware::BearerAuthState;
use content::presentation::handlers::ContentAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,content=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            token_secret: secret,
            password_pepper: env::var("PASSWORD_PEPPER").ok().map(String::into_bytes),
            ..AuthConfig::default()
        }
    };
    let auth_config = Arc::new(auth_config);

    // Login notification queue
    let mail_transport = match env::var("MAIL_API_URL") {
        Ok(endpoint) => {
            let from = env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@example.com".to_string());
            tracing::info!(endpoint = %endpoint, "Mail relay configured");
            MailTransport::http_api(endpoint, from)
        }
        Err(_) => {
            tracing::warn!("MAIL_API_URL not set; thank-you mail goes to the log only");
            MailTransport::log_only()
        }
    };
    let mail_queue = MailQueue::start(mail_transport);

    // Search index
    let search_index = match env::var("SEARCH_INDEX_URL") {
        Ok(url) => {
            tracing::info!(url = %url, "Search index configured");
            SearchIndexClient::http(url)
        }
        Err(_) => {
            tracing::warn!("SEARCH_INDEX_URL not set; index synchronization disabled");
            SearchIndexClient::noop()
        }
    };

    // Content state
    let content_state = ContentAppState {
        repo: Arc::new(PgContentRepository::new(pool.clone())),
        index: Arc::new(search_index),
        config: Arc::new(ContentConfig::default()),
    };

    let bearer_auth = BearerAuthState {
        config: auth_config.clone(),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth::auth_router(
                PgAuthRepository::new(pool.clone()),
                mail_queue,
                auth_config.clone(),
            ),
        )
        .nest(
            "/api",
            content_router_public(content_state.clone())
                .merge(content_router_protected(content_state, bearer_auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
