//! # TaskGate Gateway
//!
//! ```bash
//! cargo run -p taskgate-gateway
//! ```

use taskgate_gateway::{
    app::{build_router, AppState},
    config::Config,
};
use taskgate_shared::{shutdown::shutdown_signal, telemetry::init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("taskgate_gateway=debug,tower_http=debug");

    info!(
        "TaskGate Gateway v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let bind_address = config.bind_address();

    info!(
        auth_service = %config.upstreams.auth_url,
        user_service = %config.upstreams.user_url,
        task_service = %config.upstreams.task_url,
        timeout_ms = config.upstreams.timeout_ms,
        "Upstreams configured"
    );

    let app = build_router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Gateway listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}
