/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// { "service": "auth_service", "status": "running", "active_tokens": 3 }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,

    pub status: String,

    /// Stored tokens, including expired ones not yet reaped
    pub active_tokens: usize,

    pub version: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "auth_service".to_string(),
        status: "running".to_string(),
        active_tokens: state.authority.active_tokens().await,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
