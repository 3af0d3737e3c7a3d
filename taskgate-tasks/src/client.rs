/// Client for the auth authority's validate-token endpoint
///
/// Every protected task route calls [`AuthClient::validate`] before touching
/// the store. The call is bounded by the client's timeout; a slow or dead
/// authority surfaces as [`AuthClientError::Transport`], never as an invalid
/// token.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use taskgate_shared::auth::identity::{TokenRequest, ValidateTokenResponse, VerifiedIdentity};
use thiserror::Error;
use tracing::debug;

/// Name reported in upstream errors
pub const AUTH_SERVICE_NAME: &str = "auth_service";

/// Validation call failures
#[derive(Debug, Error)]
pub enum AuthClientError {
    /// The authority answered with a non-success status
    #[error("auth authority rejected token with status {0}")]
    Rejected(StatusCode),

    /// Connection refused, DNS failure, timeout, etc.
    #[error("{0}")]
    Transport(reqwest::Error),

    /// 2xx response whose body is not a validate-token response
    #[error("unexpected validate_token response: {0}")]
    InvalidResponse(reqwest::Error),
}

/// HTTP client for `POST /validate_token`
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    validate_url: String,
}

impl AuthClient {
    /// Creates a client for the authority at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            validate_url: format!("{}/validate_token", base_url.trim_end_matches('/')),
        })
    }

    pub fn validate_url(&self) -> &str {
        &self.validate_url
    }

    /// Asks the authority whether `token` is live
    pub async fn validate(&self, token: &str) -> Result<VerifiedIdentity, AuthClientError> {
        debug!(url = %self.validate_url, "Validating token with auth authority");

        let response = self
            .http
            .post(&self.validate_url)
            .json(&TokenRequest::new(token))
            .send()
            .await
            .map_err(AuthClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthClientError::Rejected(status));
        }

        let body: ValidateTokenResponse = response
            .json()
            .await
            .map_err(AuthClientError::InvalidResponse)?;

        Ok(body.into())
    }
}
