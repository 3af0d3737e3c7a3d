/// Request forwarding to upstream services
///
/// The gateway never authenticates. It picks an upstream from the path
/// prefix, rebuilds the URL on that upstream, and replays the request:
///
/// | Inbound | Forwarded to |
/// |---|---|
/// | `/auth/{path}` | `AUTH_SERVICE_URL/{path}` |
/// | `/users`, `/users/{path}` | `USER_SERVICE_URL/users[/{path}]` |
/// | `/tasks`, `/tasks/{path}` | `TASK_SERVICE_URL/tasks[/{path}]` |
///
/// The method, the still-encoded path, the query string, and every header
/// except `Host` are kept. The body is forwarded only if it parses as JSON,
/// and it is re-serialized with `Content-Type: application/json`, so the
/// client's `Content-Type` and the framing headers (`Content-Length`,
/// `Transfer-Encoding`) are dropped as well.
///
/// The upstream status is relayed verbatim. A JSON upstream body is relayed
/// as JSON, anything else as text. Transport failures become a
/// [`ProxyError`], rendered as 502 naming the upstream.

use axum::{
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use taskgate_shared::error::ApiError;
use thiserror::Error;
use tracing::{debug, warn};

/// Headers never copied onto the upstream request
const DROPPED_HEADERS: [HeaderName; 5] = [
    header::HOST,
    header::CONTENT_TYPE,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

/// A backend service behind the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Auth,
    Users,
    Tasks,
}

impl Upstream {
    /// Name used in error payloads
    pub fn name(&self) -> &'static str {
        match self {
            Upstream::Auth => "auth_service",
            Upstream::Users => "user_service",
            Upstream::Tasks => "task_service",
        }
    }

    /// Path prefix the upstream itself routes under
    fn service_prefix(&self) -> &'static str {
        match self {
            Upstream::Auth => "",
            Upstream::Users => "/users",
            Upstream::Tasks => "/tasks",
        }
    }
}

/// An upstream could not be reached or its response could not be read
#[derive(Debug, Error)]
#[error("error connecting to {service}: {source}")]
pub struct ProxyError {
    pub service: &'static str,

    #[source]
    pub source: reqwest::Error,
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        ApiError::BadGateway {
            service: err.service.to_string(),
            message: err.to_string(),
        }
    }
}

/// Base URLs of the upstreams
#[derive(Debug, Clone)]
pub struct UpstreamUrls {
    pub auth: String,
    pub users: String,
    pub tasks: String,
}

/// A request to replay on an upstream
#[derive(Debug)]
pub struct Forward<'a> {
    pub method: Method,

    /// Percent-encoded path after the matched gateway prefix, without a
    /// leading slash
    pub path: Option<&'a str>,

    pub query: Option<&'a str>,

    pub headers: &'a HeaderMap,

    pub body: Bytes,
}

/// HTTP client shared by all proxy routes
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: Client,
    urls: UpstreamUrls,
}

impl ProxyClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(urls: UpstreamUrls, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { http, urls })
    }

    pub fn urls(&self) -> &UpstreamUrls {
        &self.urls
    }

    fn base_url(&self, upstream: Upstream) -> &str {
        let url = match upstream {
            Upstream::Auth => &self.urls.auth,
            Upstream::Users => &self.urls.users,
            Upstream::Tasks => &self.urls.tasks,
        };
        url.trim_end_matches('/')
    }

    /// URL on `upstream` for a forwarded path and query
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use taskgate_gateway::proxy::{ProxyClient, Upstream, UpstreamUrls};
    ///
    /// let client = ProxyClient::new(
    ///     UpstreamUrls {
    ///         auth: "http://auth".into(),
    ///         users: "http://users".into(),
    ///         tasks: "http://tasks".into(),
    ///     },
    ///     Duration::from_secs(1),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(client.target_url(Upstream::Auth, Some("login"), None), "http://auth/login");
    /// assert_eq!(client.target_url(Upstream::Tasks, None, Some("a=1")), "http://tasks/tasks?a=1");
    /// ```
    pub fn target_url(&self, upstream: Upstream, path: Option<&str>, query: Option<&str>) -> String {
        let mut url = format!("{}{}", self.base_url(upstream), upstream.service_prefix());

        if let Some(path) = path {
            url.push('/');
            url.push_str(path.trim_start_matches('/'));
        }
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        url
    }

    /// Replays `req` on `upstream` and converts the answer into a response
    pub async fn forward(&self, upstream: Upstream, req: Forward<'_>) -> Result<Response, ProxyError> {
        let url = self.target_url(upstream, req.path, req.query);
        let proxy_error = |source: reqwest::Error| ProxyError {
            service: upstream.name(),
            source,
        };

        let mut headers = req.headers.clone();
        for name in &DROPPED_HEADERS {
            headers.remove(name);
        }

        let mut builder = self.http.request(req.method.clone(), &url).headers(headers);
        if let Some(json) = parse_json(&req.body) {
            builder = builder.json(&json);
        }

        debug!(service = upstream.name(), method = %req.method, url = %url, "Forwarding request");

        let response = builder.send().await.map_err(|e| {
            warn!(service = upstream.name(), url = %url, error = %e, "Upstream unreachable");
            proxy_error(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(service = upstream.name(), url = %url, error = %e, "Upstream response unreadable");
            proxy_error(e)
        })?;

        debug!(service = upstream.name(), status = %status, "Upstream responded");
        Ok(relay(status, &body))
    }
}

/// `Some` only for a non-empty body that parses as JSON
fn parse_json(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body).ok()
}

/// Rebuilds the upstream response with its original status
fn relay(status: StatusCode, body: &[u8]) -> Response {
    match parse_json(body) {
        Some(json) => (status, Json(json)).into_response(),
        None => (status, String::from_utf8_lossy(body).into_owned()).into_response(),
    }
}
