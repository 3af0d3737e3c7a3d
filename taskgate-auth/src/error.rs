/// Auth authority errors
///
/// `AuthorityError` is what the token lifecycle operations return. It is
/// converted into the shared [`ApiError`] at the HTTP boundary:
///
/// | Error | Status |
/// |---|---|
/// | `MissingToken` | 400 |
/// | `UsernameTaken` | 409 |
/// | `InvalidCredentials` | 401 |
/// | `InvalidToken`, `ExpiredToken` | 403 |
/// | `TokenNotFound` | 404 |
/// | `Password`, `Worker` | 500 |

use crate::store::UsernameTaken;
use taskgate_shared::{auth::password::PasswordError, error::ApiError};

/// Auth authority result type alias
pub type AuthorityResult<T> = Result<T, AuthorityError>;

#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// No token supplied to validate or logout
    #[error("token is required")]
    MissingToken,

    #[error("username already exists")]
    UsernameTaken(#[from] UsernameTaken),

    /// Unknown username or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token not in the store
    #[error("invalid token")]
    InvalidToken,

    /// Token found past its expiration; it has been removed
    #[error("expired token")]
    ExpiredToken,

    /// Logout for a token that is not in the store
    #[error("token not found")]
    TokenNotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Blocking hash task panicked or was cancelled
    #[error("password worker failed: {0}")]
    Worker(String),
}

impl From<AuthorityError> for ApiError {
    fn from(err: AuthorityError) -> Self {
        let message = err.to_string();
        match err {
            AuthorityError::MissingToken => ApiError::missing_fields(["token"]),
            AuthorityError::UsernameTaken(_) => ApiError::Conflict(message),
            AuthorityError::InvalidCredentials => ApiError::Unauthorized(message),
            AuthorityError::InvalidToken | AuthorityError::ExpiredToken => {
                ApiError::Forbidden(message)
            }
            AuthorityError::TokenNotFound => ApiError::NotFound(message),
            AuthorityError::Password(_) | AuthorityError::Worker(_) => {
                ApiError::InternalError(message)
            }
        }
    }
}
