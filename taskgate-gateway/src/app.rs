/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskgate_gateway::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let app = build_router(AppState::new(config)?);
///
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, proxy::ProxyClient};
use axum::{routing::get, Router};
use std::sync::Arc;
use taskgate_shared::layers::cors_layer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forwarding client for every upstream
    pub proxy: ProxyClient,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let proxy = ProxyClient::new(config.upstream_urls(), config.upstream_timeout())?;

        Ok(Self {
            proxy,
            config: Arc::new(config),
        })
    }
}

/// Builds the gateway router
///
/// ```text
/// /
/// ├── GET  /                          # upstream listing
/// ├── *    /auth/*path   → AUTH/{path}
/// ├── *    /users        → USERS/users
/// ├── *    /users/*path  → USERS/users/{path}
/// ├── *    /tasks        → TASKS/tasks
/// └── *    /tasks/*path  → TASKS/tasks/{path}
/// ```
///
/// `*` is GET, POST, PUT and DELETE. No route authenticates.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, proxy};

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .route("/", get(health::root))
        .route(
            "/auth/*path",
            get(proxy::auth_proxy)
                .post(proxy::auth_proxy)
                .put(proxy::auth_proxy)
                .delete(proxy::auth_proxy),
        )
        .route(
            "/users",
            get(proxy::users_root_proxy)
                .post(proxy::users_root_proxy)
                .put(proxy::users_root_proxy)
                .delete(proxy::users_root_proxy),
        )
        .route(
            "/users/*path",
            get(proxy::users_proxy)
                .post(proxy::users_proxy)
                .put(proxy::users_proxy)
                .delete(proxy::users_proxy),
        )
        .route(
            "/tasks",
            get(proxy::tasks_root_proxy)
                .post(proxy::tasks_root_proxy)
                .put(proxy::tasks_root_proxy)
                .delete(proxy::tasks_root_proxy),
        )
        .route(
            "/tasks/*path",
            get(proxy::tasks_proxy)
                .post(proxy::tasks_proxy)
                .put(proxy::tasks_proxy)
                .delete(proxy::tasks_proxy),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
