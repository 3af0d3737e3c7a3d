//! Common test utilities for task service integration tests
//!
//! - A real auth authority spawned on an ephemeral port
//! - The task router wired to it, over an in-memory store
//! - Request helpers returning `(StatusCode, Value)`

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use taskgate_auth::authority::AuthAuthority;
use taskgate_tasks::{
    app::{build_router, AppState},
    config::Config,
    store::{MemoryTaskStore, TaskStore},
};
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// A running auth authority
pub struct TestAuthServer {
    pub authority: Arc<AuthAuthority>,
    addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawns the authority's real router on `127.0.0.1:0`
    pub async fn spawn() -> anyhow::Result<Self> {
        let config = taskgate_auth::config::Config::default();
        let authority = Arc::new(AuthAuthority::new(config.token_ttl()));
        let state = taskgate_auth::app::AppState::with_authority(authority.clone(), config);
        let app = taskgate_auth::app::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test auth server error: {}", e);
            }
        });

        Ok(Self {
            authority,
            addr,
            _handle: handle,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Registers `username` and returns a fresh token for it
    pub async fn token_for(&self, username: &str, password: &str) -> anyhow::Result<String> {
        self.authority.register(username, password).await?;
        let session = self.authority.login(username, password).await?;
        Ok(session.token)
    }
}

/// Task router plus the authority it validates against
pub struct TestContext {
    pub auth: TestAuthServer,
    pub store: Arc<MemoryTaskStore>,
    pub app: Router,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        let auth = TestAuthServer::spawn().await?;
        let store = Arc::new(MemoryTaskStore::new());
        let app = task_app(store.clone(), &auth.url())?;

        Ok(Self { auth, store, app })
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.app, method, uri, token, body).await
    }
}

/// Builds the task router against the authority at `auth_url`
pub fn task_app(store: Arc<dyn TaskStore>, auth_url: &str) -> anyhow::Result<Router> {
    task_app_with_timeout(store, auth_url, 2000)
}

/// Same as [`task_app`] with an explicit validation timeout
pub fn task_app_with_timeout(
    store: Arc<dyn TaskStore>,
    auth_url: &str,
    timeout_ms: u64,
) -> anyhow::Result<Router> {
    let mut config = Config::default();
    config.auth.url = auth_url.to_string();
    config.auth.timeout_ms = timeout_ms;

    Ok(build_router(AppState::new(store, config)?))
}

/// A loopback address with nothing listening on it
pub fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
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

/// Sends a request through the router; `token` goes in `Authorization` as is
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", token);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
