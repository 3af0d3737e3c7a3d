/// Error handling shared by every TaskGate service
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, ApiError>`; each service converts its own
/// domain errors into `ApiError` at the HTTP boundary.
///
/// Every error body is a JSON object with an `error` string field:
///
/// ```json
/// { "error": "invalid credentials", "code": "unauthorized" }
/// ```
///
/// # Example
///
/// ```
/// use taskgate_shared::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(found: bool) -> ApiResult<Json<Value>> {
///     if !found {
///         return Err(ApiError::NotFound("Task not found".to_string()));
///     }
///     Ok(Json(json!({ "ok": true })))
/// }
/// ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - malformed or missing input
    BadRequest(String),

    /// Bad request (400) with one entry per offending field
    ValidationError(Vec<ValidationErrorDetail>),

    /// Unauthorized (401) - missing credentials or bad login
    Unauthorized(String),

    /// Forbidden (403) - token rejected
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - e.g., duplicate username
    Conflict(String),

    /// Bad gateway (502) - a downstream service could not be reached
    BadGateway {
        /// Name of the unreachable service (e.g. "auth_service")
        service: String,
        message: String,
    },

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Machine-readable error code (e.g., "bad_request", "unauthorized")
    pub code: String,

    /// Unreachable service, only for 502 responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ApiError {
    /// HTTP status this error renders as
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds a validation error from the names of missing fields
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ApiError::ValidationError(
            fields
                .into_iter()
                .map(|field| {
                    let field = field.into();
                    ValidationErrorDetail {
                        message: format!("{} is required", field),
                        field,
                    }
                })
                .collect(),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::BadGateway { service, message } => {
                write!(f, "Bad gateway ({}): {}", service, message)
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::BadRequest(msg) => ErrorResponse::new(msg, "bad_request"),
            ApiError::ValidationError(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                let message = format!("Missing or invalid fields: {}", fields.join(", "));
                ErrorResponse {
                    details: Some(errors),
                    ..ErrorResponse::new(message, "validation_error")
                }
            }
            ApiError::Unauthorized(msg) => ErrorResponse::new(msg, "unauthorized"),
            ApiError::Forbidden(msg) => ErrorResponse::new(msg, "forbidden"),
            ApiError::NotFound(msg) => ErrorResponse::new(msg, "not_found"),
            ApiError::Conflict(msg) => ErrorResponse::new(msg, "conflict"),
            ApiError::BadGateway { service, message } => ErrorResponse {
                service: Some(service),
                ..ErrorResponse::new(message, "bad_gateway")
            },
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new("An internal error occurred".to_string(), "internal_error")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl ErrorResponse {
    fn new(error: String, code: &str) -> Self {
        Self {
            error,
            code: code.to_string(),
            service: None,
            details: None,
        }
    }
}

/// Malformed JSON, wrong content type or wrong field types
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

/// Unparsable path parameter, e.g. `/tasks/abc`
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// Convert `validator` failures into per-field details
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();

        // HashMap iteration order is unspecified
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::ValidationError(details)
    }
}
