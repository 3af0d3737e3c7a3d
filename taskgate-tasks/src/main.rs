//! # TaskGate Task Service
//!
//! ```bash
//! cargo run -p taskgate-tasks
//! ```

use std::sync::Arc;
use taskgate_shared::{shutdown::shutdown_signal, telemetry::init_tracing};
use taskgate_tasks::{
    app::{build_router, AppState},
    config::Config,
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{seed_demo_tasks, MemoryTaskStore, PgTaskStore, TaskStore},
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("taskgate_tasks=debug,tower_http=debug");

    info!(
        "TaskGate Task Service v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let bind_address = config.bind_address();

    let pool = match &config.database {
        Some(db) => {
            let pool = create_pool(DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                ..Default::default()
            })
            .await?;
            run_migrations(&pool).await?;
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; tasks are kept in memory and lost on restart");
            None
        }
    };

    let store: Arc<dyn TaskStore> = match &pool {
        Some(pool) => Arc::new(PgTaskStore::new(pool.clone())),
        None => Arc::new(MemoryTaskStore::new()),
    };

    if config.seed_demo_data {
        seed_demo_tasks(store.as_ref()).await?;
    }

    info!(auth_service = %config.auth.url, "Validating tokens against auth authority");

    let state = AppState::new(store, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Task service listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    info!("Task service stopped");
    Ok(())
}
