/// HTTP route handlers
///
/// - `tasks`: Task CRUD (token required)
/// - `status`: Status listing (public)
/// - `health`: Health check (public)

pub mod health;
pub mod status;
pub mod tasks;
