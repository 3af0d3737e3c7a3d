/// Bearer token parsing
///
/// Clients may send either `Authorization: Bearer <token>` or the bare
/// token. Both forms are accepted everywhere a token is read.

use axum::http::{header, HeaderMap};

/// Conventional prefix on an authorization header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Strips an optional `Bearer ` prefix from a token value
///
/// # Example
///
/// ```
/// use taskgate_shared::auth::bearer::strip_bearer;
///
/// assert_eq!(strip_bearer("Bearer abc"), "abc");
/// assert_eq!(strip_bearer("abc"), "abc");
/// ```
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

/// Extracts the token from the `Authorization` header
///
/// Returns `None` when the header is absent, not valid UTF-8, or blank
/// once the prefix is removed.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = strip_bearer(value.trim_start()).trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
