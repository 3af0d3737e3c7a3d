/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// { "service": "task_service", "status": "running", "active_tasks": 4 }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskgate_shared::error::ApiResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,

    pub status: String,

    pub active_tasks: i64,

    pub version: String,
}

pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let active_tasks = state.store.count_active().await?;

    Ok(Json(HealthResponse {
        service: "task_service".to_string(),
        status: "running".to_string(),
        active_tasks,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
