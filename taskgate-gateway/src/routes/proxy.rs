/// Pass-through routes
///
/// Each handler only picks the upstream and the remaining path; the rest is
/// [`ProxyClient::forward`](crate::proxy::ProxyClient::forward).
///
/// The remaining path is cut from the raw request URI rather than extracted
/// as a path parameter, so percent-encoded sequences (`%2F`, `%3F`, `%23`)
/// reach the upstream exactly as the client sent them.

use crate::{
    app::AppState,
    proxy::{Forward, Upstream},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
};
use taskgate_shared::error::ApiResult;

/// Still-encoded path after `prefix`, e.g. `a%2Fb` for `/tasks/a%2Fb`
fn encoded_tail<'a>(uri: &'a Uri, prefix: &str) -> &'a str {
    uri.path().strip_prefix(prefix).unwrap_or_default()
}

async fn forward(
    state: &AppState,
    upstream: Upstream,
    path: Option<&str>,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let response = state
        .proxy
        .forward(
            upstream,
            Forward {
                method,
                path,
                query: uri.query(),
                headers,
                body,
            },
        )
        .await?;

    Ok(response)
}

/// `/auth/*path` → auth authority `/{path}`
pub async fn auth_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let path = encoded_tail(&uri, "/auth/");
    forward(&state, Upstream::Auth, Some(path), method, &uri, &headers, body).await
}

/// `/users` → user service `/users`
pub async fn users_root_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, Upstream::Users, None, method, &uri, &headers, body).await
}

/// `/users/*path` → user service `/users/{path}`
pub async fn users_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let path = encoded_tail(&uri, "/users/");
    forward(&state, Upstream::Users, Some(path), method, &uri, &headers, body).await
}

/// `/tasks` → task service `/tasks`
pub async fn tasks_root_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    forward(&state, Upstream::Tasks, None, method, &uri, &headers, body).await
}

/// `/tasks/*path` → task service `/tasks/{path}`
pub async fn tasks_proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let path = encoded_tail(&uri, "/tasks/");
    forward(&state, Upstream::Tasks, Some(path), method, &uri, &headers, body).await
}
