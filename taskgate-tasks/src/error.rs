/// HTTP mapping for task service errors
///
/// | Error | Status | Body `error` |
/// |---|---|---|
/// | `StoreError::TaskNotFound` | 404 | "Task not found" |
/// | `StoreError::InvalidStatus` | 400 | "invalid status" |
/// | `StoreError::Database` | 500 | hidden |
/// | `AuthClientError::Rejected` | 403 | "invalid or expired token" |
/// | `AuthClientError::Transport`, `InvalidResponse` | 502 | "error connecting to auth_service: ..." |

use crate::{
    client::{AuthClientError, AUTH_SERVICE_NAME},
    store::StoreError,
};
use taskgate_shared::error::ApiError;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TaskNotFound(_) => ApiError::NotFound("Task not found".to_string()),
            StoreError::InvalidStatus(_) => ApiError::BadRequest("invalid status".to_string()),
            StoreError::Database(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<AuthClientError> for ApiError {
    fn from(err: AuthClientError) -> Self {
        match err {
            AuthClientError::Rejected(_) => {
                ApiError::Forbidden("invalid or expired token".to_string())
            }
            AuthClientError::Transport(_) | AuthClientError::InvalidResponse(_) => {
                ApiError::BadGateway {
                    service: AUTH_SERVICE_NAME.to_string(),
                    message: format!("error connecting to {}: {}", AUTH_SERVICE_NAME, err),
                }
            }
        }
    }
}
