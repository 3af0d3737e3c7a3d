/// Task endpoints
///
/// All routes here sit behind the token-required guard, so every handler
/// can rely on a `VerifiedIdentity` extension being present.
///
/// - `GET /tasks` - List active tasks
/// - `GET /tasks/:id` - Get one task, active or not
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Partial update
/// - `DELETE /tasks/:id` - Soft delete

use crate::{
    app::AppState,
    models::task::{NewTask, TaskChanges, TaskView},
};
use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskgate_shared::{
    auth::identity::VerifiedIdentity,
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath},
};
use tracing::info;
use validator::Validate;

/// Create task request
///
/// ```json
/// { "name_task": "x", "desc_task": "y", "deadline": "2024-02-01", "status": 1 }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(rename = "name_task")]
    #[validate(required(message = "name_task is required"))]
    pub name: Option<String>,

    #[serde(rename = "desc_task")]
    #[validate(required(message = "desc_task is required"))]
    pub description: Option<String>,

    #[validate(required(message = "deadline is required"))]
    pub deadline: Option<NaiveDate>,

    #[serde(rename = "status")]
    #[validate(required(message = "status is required"))]
    pub status_id: Option<i64>,

    /// Defaults to `true`
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl CreateTaskRequest {
    /// Validates and builds the insert, stamping today's date and the creator
    fn into_new_task(self, created_by: String, created_on: NaiveDate) -> ApiResult<NewTask> {
        self.validate()?;

        match (self.name, self.description, self.deadline, self.status_id) {
            (Some(name), Some(description), Some(deadline), Some(status_id)) => Ok(NewTask {
                name,
                description,
                created_on,
                deadline,
                status_id,
                is_active: self.is_active.unwrap_or(true),
                created_by,
            }),
            _ => Err(ApiError::missing_fields([
                "name_task",
                "desc_task",
                "deadline",
                "status",
            ])),
        }
    }
}

/// Update task request
///
/// Only these fields are updatable; anything else in the body is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(rename = "name_task")]
    pub name: Option<String>,

    #[serde(rename = "desc_task")]
    pub description: Option<String>,

    pub deadline: Option<NaiveDate>,

    #[serde(rename = "status")]
    pub status_id: Option<i64>,

    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl UpdateTaskRequest {
    /// Parses a PUT body
    ///
    /// An empty body, a non-object, or `{}` is "no data provided".
    fn from_body(body: &[u8]) -> ApiResult<Self> {
        let no_data = || ApiError::BadRequest("no data provided".to_string());

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(no_data());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

        match &value {
            Value::Object(map) if !map.is_empty() => {}
            _ => return Err(no_data()),
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            deadline: req.deadline,
            status_id: req.status_id,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: TaskView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTaskResponse {
    pub message: String,

    pub task_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List active tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<TaskListResponse>> {
    let tasks = state.store.list_active().await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Get a task by ID
///
/// # Errors
///
/// - `404 Not Found`: no task with that ID
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Create a task
///
/// The creator is the username the auth authority verified for this
/// request.
///
/// # Errors
///
/// - `400 Bad Request`: a required field is missing or `status` does not exist
pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    let task = req.into_new_task(identity.username, Utc::now().date_naive())?;

    let task_id = state.store.create(task).await?;
    info!(task_id, user_id = identity.user_id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created successfully".to_string(),
            task_id,
        }),
    ))
}

/// Partially update a task
///
/// # Errors
///
/// - `400 Bad Request`: empty body or `status` does not exist
/// - `404 Not Found`: no task with that ID
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let changes = TaskChanges::from(UpdateTaskRequest::from_body(&body)?);

    state.store.update(id, changes).await?;

    Ok(Json(MessageResponse {
        message: "Task updated successfully".to_string(),
    }))
}

/// Soft-delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with that ID
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.store.deactivate(id).await?;
    info!(task_id = id, user_id = identity.user_id, "Task deactivated");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
