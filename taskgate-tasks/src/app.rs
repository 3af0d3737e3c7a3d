/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskgate_tasks::{
///     app::{build_router, AppState},
///     config::Config,
///     store::MemoryTaskStore,
/// };
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryTaskStore::new()), config)?;
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5003").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    client::AuthClient, config::Config, middleware::token_required::token_required,
    store::TaskStore,
};
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use taskgate_shared::layers::cors_layer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Task records
    pub store: Arc<dyn TaskStore>,

    /// Validation client for the auth authority
    pub auth: AuthClient,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state, building the auth client from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(store: Arc<dyn TaskStore>, config: Config) -> Result<Self, reqwest::Error> {
        let auth = AuthClient::new(&config.auth.url, config.auth_timeout())?;

        Ok(Self {
            store,
            auth,
            config: Arc::new(config),
        })
    }
}

/// Builds the task service router
///
/// ```text
/// /
/// ├── GET    /health          # public
/// ├── GET    /status          # public
/// ├── GET    /tasks           # token required
/// ├── POST   /tasks           # token required
/// ├── GET    /tasks/:id       # token required
/// ├── PUT    /tasks/:id       # token required
/// └── DELETE /tasks/:id       # token required
/// ```
///
/// The guard is attached with `route_layer`, so an unknown path is still a
/// plain 404 rather than a token error.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/status", get(routes::status::list_statuses));

    let task_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), token_required));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
