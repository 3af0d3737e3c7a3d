/// Status listing
///
/// ```text
/// GET /status
/// ```
///
/// ```json
/// { "status": [{ "id": 1, "name": "In progress" }, ...] }
/// ```
///
/// Public; the token guard does not apply.

use crate::{app::AppState, models::status::Status};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskgate_shared::error::ApiResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusListResponse {
    pub status: Vec<Status>,
}

pub async fn list_statuses(State(state): State<AppState>) -> ApiResult<Json<StatusListResponse>> {
    let status = state.store.list_statuses().await?;
    Ok(Json(StatusListResponse { status }))
}
