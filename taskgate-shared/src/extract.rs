/// Extractors with TaskGate error bodies
///
/// `axum::Json` and `axum::extract::Path` reject bad input with a plain-text
/// 4xx. `AppJson` and `AppPath` wrap them so that malformed bodies and path
/// parameters come back as a 400 `ApiError` like every other failure.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use taskgate_shared::extract::AppJson;
///
/// #[derive(Deserialize)]
/// struct LogoutRequest {
///     token: Option<String>,
/// }
///
/// async fn logout(AppJson(req): AppJson<LogoutRequest>) -> String {
///     req.token.unwrap_or_default()
/// }
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// `Json<T>` whose rejection is an [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` whose rejection is an [`ApiError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
