/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskgate_auth::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{authority::AuthAuthority, config::Config};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use taskgate_shared::layers::cors_layer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request via Axum's `State` extractor. The authority owns
/// the credential and token stores; handlers only borrow it.
#[derive(Clone)]
pub struct AppState {
    /// Token lifecycle service
    pub authority: Arc<AuthAuthority>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state with empty stores
    pub fn new(config: Config) -> Self {
        let authority = AuthAuthority::new(config.token_ttl());
        Self::with_authority(Arc::new(authority), config)
    }

    /// Creates state around an existing authority
    pub fn with_authority(authority: Arc<AuthAuthority>, config: Config) -> Self {
        Self {
            authority,
            config: Arc::new(config),
        }
    }
}

/// Builds the auth authority router
///
/// ```text
/// /
/// ├── GET  /health
/// ├── POST /register
/// ├── POST /login
/// ├── POST /validate_token   # called by the task service
/// └── POST /logout
/// ```
///
/// None of the routes require authentication.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/validate_token", post(routes::auth::validate_token))
        .route("/logout", post(routes::auth::logout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
