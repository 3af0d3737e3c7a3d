/// Gateway root
///
/// ```text
/// GET /
/// ```
///
/// ```json
/// {
///   "message": "API Gateway running",
///   "services": {
///     "auth_service": "http://127.0.0.1:5001",
///     "user_service": "http://127.0.0.1:5002",
///     "task_service": "http://127.0.0.1:5003"
///   }
/// }
/// ```
///
/// Upstreams are listed, not probed.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub message: String,

    pub services: ServiceUrls,

    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceUrls {
    pub auth_service: String,

    pub user_service: String,

    pub task_service: String,
}

pub async fn root(State(state): State<AppState>) -> Json<GatewayInfo> {
    let urls = state.proxy.urls();

    Json(GatewayInfo {
        message: "API Gateway running".to_string(),
        services: ServiceUrls {
            auth_service: urls.auth.clone(),
            user_service: urls.users.clone(),
            task_service: urls.tasks.clone(),
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
