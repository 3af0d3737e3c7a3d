//! Common test utilities for gateway tests
//!
//! - `spawn`: serve any router on an ephemeral loopback port
//! - `echo_upstream`: an upstream that reports back what it received
//! - `gateway`: the gateway router pointed at given upstream URLs

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use serde_json::{json, Map, Value};
use taskgate_gateway::{
    app::{build_router, AppState},
    config::Config,
};
use tower::ServiceExt;

/// Serves `app` on `127.0.0.1:0` and returns its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("Test upstream error: {}", e);
        }
    });

    format!("http://{}", addr)
}

/// A loopback address that accepts connections and never answers
pub async fn silent_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}", addr)
}

/// A loopback address with nothing listening on it
pub fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "headers": headers,
        "body": serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null),
    }))
}

/// Echoes every request as JSON, except:
///
/// - `/teapot` answers 418 with a JSON body
/// - `/plain` answers 404 with a text body
pub fn echo_upstream() -> Router {
    Router::new()
        .route(
            "/teapot",
            any(|| async { (StatusCode::IM_A_TEAPOT, Json(json!({ "error": "short and stout" }))) }),
        )
        .route(
            "/plain",
            any(|| async { (StatusCode::NOT_FOUND, "nothing here") }),
        )
        .fallback(echo)
}

/// Gateway router for the given upstreams
pub fn gateway(auth: &str, users: &str, tasks: &str) -> Router {
    gateway_with_timeout(auth, users, tasks, 2000)
}

/// Same as [`gateway`] with an explicit upstream timeout
pub fn gateway_with_timeout(auth: &str, users: &str, tasks: &str, timeout_ms: u64) -> Router {
    let mut config = Config::default();
    config.upstreams.auth_url = auth.to_string();
    config.upstreams.user_url = users.to_string();
    config.upstreams.task_url = tasks.to_string();
    config.upstreams.timeout_ms = timeout_ms;

    build_router(AppState::new(config).unwrap())
}

/// Raw response from the gateway
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a request through the gateway router
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

/// Sends a raw body through the gateway router with only the given headers
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    Reply {
        status,
        headers,
        body,
    }
}
