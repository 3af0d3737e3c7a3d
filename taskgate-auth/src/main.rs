//! # TaskGate Auth Authority
//!
//! ```bash
//! cargo run -p taskgate-auth
//! ```

use taskgate_auth::{
    app::{build_router, AppState},
    config::Config,
};
use taskgate_shared::{shutdown::shutdown_signal, telemetry::init_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("taskgate_auth=debug,tower_http=debug");

    info!(
        "TaskGate Auth Authority v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let bind_address = config.bind_address();
    let seed_demo_users = config.seed_demo_users;

    let state = AppState::new(config);

    if seed_demo_users {
        state.authority.seed_demo_users().await?;
        info!("Demo users seeded");
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Auth authority listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Auth authority stopped");
    Ok(())
}
