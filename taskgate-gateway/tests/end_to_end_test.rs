/// Client → gateway → auth authority / task service, all real routers

mod common;

use axum::http::StatusCode;
use common::{dead_address, gateway, send, send_raw, spawn};
use serde_json::json;
use std::sync::Arc;
use taskgate_tasks::store::MemoryTaskStore;

async fn spawn_auth() -> String {
    let state = taskgate_auth::app::AppState::new(taskgate_auth::config::Config::default());
    spawn(taskgate_auth::app::build_router(state)).await
}

async fn spawn_tasks(auth_url: &str) -> String {
    let mut config = taskgate_tasks::config::Config::default();
    config.auth.url = auth_url.to_string();
    config.auth.timeout_ms = 2000;

    let state =
        taskgate_tasks::app::AppState::new(Arc::new(MemoryTaskStore::new()), config).unwrap();
    spawn(taskgate_tasks::app::build_router(state)).await
}

#[tokio::test]
async fn test_register_login_create_list() {
    let auth = spawn_auth().await;
    let tasks = spawn_tasks(&auth).await;
    let app = gateway(&auth, &dead_address(), &tasks);

    let creds = json!({ "username": "alice", "password": "pw1" });

    let reply = send(&app, "POST", "/auth/register", &[], Some(creds.clone())).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let reply = send(&app, "POST", "/auth/login", &[], Some(creds)).await;
    assert_eq!(reply.status, StatusCode::OK);
    let token = reply.json()["token"].as_str().unwrap().to_string();
    let bearer = format!("Bearer {}", token);

    let reply = send(
        &app,
        "POST",
        "/tasks",
        &[("authorization", bearer.as_str())],
        Some(json!({
            "name_task": "x",
            "desc_task": "y",
            "deadline": "2024-02-01",
            "status": 1
        })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let task_id = reply.json()["task_id"].as_i64().unwrap();

    let reply = send(&app, "GET", "/tasks", &[("authorization", bearer.as_str())], None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let body = reply.json();
    let task = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id_task"] == task_id)
        .cloned()
        .unwrap();
    assert_eq!(task["status"], "In progress");
    assert_eq!(task["Created_by"], "alice");
}

#[tokio::test]
async fn test_json_sent_as_text_plain_still_creates_task() {
    let auth = spawn_auth().await;
    let tasks = spawn_tasks(&auth).await;
    let app = gateway(&auth, &dead_address(), &tasks);

    let creds = json!({ "username": "bob", "password": "pw2" });
    send(&app, "POST", "/auth/register", &[], Some(creds.clone())).await;
    let reply = send(&app, "POST", "/auth/login", &[], Some(creds)).await;
    let bearer = format!("Bearer {}", reply.json()["token"].as_str().unwrap());

    let body = json!({
        "name_task": "x",
        "desc_task": "y",
        "deadline": "2024-02-01",
        "status": 1
    });
    let reply = send_raw(
        &app,
        "POST",
        "/tasks",
        &[("authorization", bearer.as_str()), ("content-type", "text/plain")],
        &body.to_string(),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_task_errors_relayed_unchanged() {
    let auth = spawn_auth().await;
    let tasks = spawn_tasks(&auth).await;
    let app = gateway(&auth, &dead_address(), &tasks);

    let reply = send(&app, "GET", "/tasks", &[], None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.json()["error"], "missing token");

    let reply = send(&app, "GET", "/tasks", &[("authorization", "Bearer nope")], None).await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = send(
        &app,
        "POST",
        "/auth/login",
        &[],
        Some(json!({ "username": "ghost", "password": "x" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.json()["error"], "invalid credentials");
}

#[tokio::test]
async fn test_auth_down_behind_task_service() {
    // The task service is up but cannot reach its authority
    let tasks = spawn_tasks(&dead_address()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send(&app, "GET", "/tasks", &[("authorization", "Bearer abc")], None).await;

    // The task service's 502 is relayed, so it names the authority, not the task service
    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert_eq!(reply.json()["service"], "auth_service");
}

#[tokio::test]
async fn test_task_service_down() {
    let auth = spawn_auth().await;
    let app = gateway(&auth, &dead_address(), &dead_address());

    let reply = send(&app, "PUT", "/tasks/42", &[], Some(json!({ "status": 2 }))).await;

    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert_eq!(reply.json()["service"], "task_service");
}
