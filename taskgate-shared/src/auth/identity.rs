/// Verified identity and the validate-token contract
///
/// The task service never sees credentials. It forwards the caller's token
/// to `POST /validate_token` on the auth authority and, on success, attaches
/// a [`VerifiedIdentity`] to the request so handlers can read it with
/// `Extension<VerifiedIdentity>`.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskgate_shared::auth::identity::VerifiedIdentity;
///
/// async fn handler(Extension(identity): Extension<VerifiedIdentity>) -> String {
///     format!("Hello, {}!", identity.username)
/// }
/// ```

use serde::{Deserialize, Serialize};

/// Identity confirmed by the auth authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    /// Subject user ID
    pub user_id: i64,

    /// Subject username
    pub username: String,
}

/// Body of `POST /validate_token` and `POST /logout`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Token value, with or without a `Bearer ` prefix
    pub token: Option<String>,
}

impl TokenRequest {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

/// Successful `POST /validate_token` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub message: String,

    pub user_id: i64,

    pub username: String,
}

impl From<ValidateTokenResponse> for VerifiedIdentity {
    fn from(response: ValidateTokenResponse) -> Self {
        Self {
            user_id: response.user_id,
            username: response.username,
        }
    }
}
