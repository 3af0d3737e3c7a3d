/// Authentication endpoints
///
/// - `POST /register` - Register new user
/// - `POST /login` - Verify credentials and issue a token
/// - `POST /validate_token` - Check a token (internal, used by the task service)
/// - `POST /logout` - Revoke a token

use crate::app::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskgate_shared::{
    auth::identity::{TokenRequest, ValidateTokenResponse},
    error::{ApiError, ApiResult},
    extract::AppJson,
};
use validator::Validate;

/// Username/password body for register and login
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,

    /// Any present value is accepted; an empty one simply never matches
    #[validate(required(message = "password is required"))]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Validates and returns `(username, password)`
    fn into_parts(self) -> ApiResult<(String, String)> {
        self.validate()?;
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::missing_fields(["username", "password"])),
        }
    }
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,

    pub user_id: i64,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,

    /// Opaque bearer token
    pub token: String,

    pub user_id: i64,

    pub username: String,

    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new user
///
/// ```text
/// POST /register
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: username or password missing
/// - `409 Conflict`: username already exists
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let (username, password) = req.into_parts()?;

    let user = state.authority.register(&username, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login
///
/// ```text
/// POST /login
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: username or password missing
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (username, password) = req.into_parts()?;

    let session = state.authority.login(&username, &password).await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        token: session.token,
        user_id: session.user_id,
        username: session.username,
        expires_at: session.expires_at,
    }))
}

/// Validate a token
///
/// ```text
/// POST /validate_token
/// { "token": "Bearer 3f9a..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: token missing
/// - `403 Forbidden`: invalid token / expired token
pub async fn validate_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<TokenRequest>,
) -> ApiResult<Json<ValidateTokenResponse>> {
    let identity = state.authority.validate_token(req.token.as_deref()).await?;

    Ok(Json(ValidateTokenResponse {
        message: "Token valid".to_string(),
        user_id: identity.user_id,
        username: identity.username,
    }))
}

/// Logout
///
/// ```text
/// POST /logout
/// { "token": "3f9a..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: token missing
/// - `404 Not Found`: token not present
pub async fn logout(
    State(state): State<AppState>,
    AppJson(req): AppJson<TokenRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.authority.logout(req.token.as_deref()).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}
