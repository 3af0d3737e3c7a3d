/// Auth authority route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Register, login, validate_token, logout

pub mod auth;
pub mod health;
