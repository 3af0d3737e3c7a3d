/// Forwarding tests against echo upstreams

mod common;

use axum::http::StatusCode;
use common::{
    dead_address, echo_upstream, gateway, gateway_with_timeout, send, send_raw, silent_address,
    spawn,
};
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_put_task_forwarded_with_body_and_headers() {
    let tasks = spawn(echo_upstream()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send(
        &app,
        "PUT",
        "/tasks/42",
        &[
            ("host", "gateway.local"),
            ("authorization", "Bearer abc"),
            ("x-request-id", "req-1"),
        ],
        Some(json!({ "status": 3 })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    let echoed = reply.json();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["path"], "/tasks/42");
    assert_eq!(echoed["body"], json!({ "status": 3 }));
    assert_eq!(echoed["headers"]["authorization"], "Bearer abc");
    assert_eq!(echoed["headers"]["x-request-id"], "req-1");
    assert_eq!(echoed["headers"]["content-type"], "application/json");
    assert_ne!(echoed["headers"]["host"], "gateway.local");
}

#[tokio::test]
async fn test_prefix_rewriting() {
    let upstream = spawn(echo_upstream()).await;
    let app = gateway(&upstream, &upstream, &upstream);

    let cases = [
        ("POST", "/auth/login", "/login"),
        ("POST", "/auth/validate_token", "/validate_token"),
        ("GET", "/users", "/users"),
        ("DELETE", "/users/7", "/users/7"),
        ("GET", "/tasks", "/tasks"),
        ("GET", "/tasks/42", "/tasks/42"),
    ];

    for (method, uri, expected) in cases {
        let reply = send(&app, method, uri, &[], None).await;
        assert_eq!(reply.status, StatusCode::OK, "{} {}", method, uri);

        let echoed = reply.json();
        assert_eq!(echoed["method"], method);
        assert_eq!(echoed["path"], expected, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_percent_encoded_path_forwarded_unchanged() {
    let upstream = spawn(echo_upstream()).await;
    let app = gateway(&upstream, &upstream, &upstream);

    let cases = [
        ("/tasks/a%3Fadmin=1", "/tasks/a%3Fadmin=1"),
        ("/tasks/a%2Fb", "/tasks/a%2Fb"),
        ("/tasks/x%23frag", "/tasks/x%23frag"),
        ("/users/a%20b", "/users/a%20b"),
        ("/auth/a%2Fb", "/a%2Fb"),
    ];

    for (uri, expected) in cases {
        let reply = send(&app, "GET", uri, &[], None).await;
        assert_eq!(reply.status, StatusCode::OK, "{}", uri);

        let echoed = reply.json();
        assert_eq!(echoed["path"], expected, "{}", uri);
        assert_eq!(echoed["query"], serde_json::Value::Null, "{}", uri);
    }
}

#[tokio::test]
async fn test_json_body_forwarded_as_json_whatever_its_content_type() {
    let tasks = spawn(echo_upstream()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send_raw(
        &app,
        "POST",
        "/tasks",
        &[("content-type", "text/plain")],
        r#"{"name_task":"x"}"#,
    )
    .await;

    let echoed = reply.json();
    assert_eq!(echoed["body"], json!({ "name_task": "x" }));
    assert_eq!(echoed["headers"]["content-type"], "application/json");
}

#[tokio::test]
async fn test_non_json_body_not_forwarded() {
    let tasks = spawn(echo_upstream()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send_raw(
        &app,
        "POST",
        "/tasks",
        &[("content-type", "text/plain")],
        "hello",
    )
    .await;

    let echoed = reply.json();
    assert_eq!(echoed["body"], serde_json::Value::Null);
    assert_eq!(echoed["headers"]["content-type"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_query_string_preserved() {
    let tasks = spawn(echo_upstream()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send(&app, "GET", "/tasks?page=2&sort=deadline", &[], None).await;

    assert_eq!(reply.json()["query"], "page=2&sort=deadline");
}

#[tokio::test]
async fn test_no_body_forwarded_when_absent() {
    let tasks = spawn(echo_upstream()).await;
    let app = gateway(&dead_address(), &dead_address(), &tasks);

    let reply = send(&app, "DELETE", "/tasks/1", &[], None).await;

    assert_eq!(reply.json()["body"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_upstream_status_and_json_relayed_verbatim() {
    let auth = spawn(echo_upstream()).await;
    let app = gateway(&auth, &dead_address(), &dead_address());

    let reply = send(&app, "GET", "/auth/teapot", &[], None).await;

    assert_eq!(reply.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(reply.json(), json!({ "error": "short and stout" }));
}

#[tokio::test]
async fn test_non_json_upstream_body_relayed_as_text() {
    let auth = spawn(echo_upstream()).await;
    let app = gateway(&auth, &dead_address(), &dead_address());

    let reply = send(&app, "GET", "/auth/plain", &[], None).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.text(), "nothing here");
    assert!(reply.headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_502_naming_service() {
    let app = gateway(&dead_address(), &dead_address(), &dead_address());

    let cases = [
        ("/auth/login", "auth_service"),
        ("/users/1", "user_service"),
        ("/tasks/42", "task_service"),
    ];

    for (uri, service) in cases {
        let reply = send(&app, "GET", uri, &[], None).await;
        assert_eq!(reply.status, StatusCode::BAD_GATEWAY, "{}", uri);

        let body = reply.json();
        assert_eq!(body["service"], service);
        assert_eq!(body["code"], "bad_gateway");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with(&format!("error connecting to {}", service)));
    }
}

#[tokio::test]
async fn test_root_lists_upstreams() {
    let app = gateway("http://a:1", "http://u:2", "http://t:3");

    let reply = send(&app, "GET", "/", &[], None).await;

    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["services"]["auth_service"], "http://a:1");
    assert_eq!(body["services"]["user_service"], "http://u:2");
    assert_eq!(body["services"]["task_service"], "http://t:3");
}

#[tokio::test]
async fn test_unresponsive_upstream_times_out_as_502() {
    let app = gateway_with_timeout(
        &dead_address(),
        &dead_address(),
        &silent_address().await,
        300,
    );

    let started = Instant::now();
    let reply = send(&app, "GET", "/tasks", &[], None).await;
    let elapsed = started.elapsed();

    assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
    assert_eq!(reply.json()["service"], "task_service");
    assert!(elapsed >= Duration::from_millis(250), "{:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
}
