/// Middleware for the task service
///
/// - `token_required`: Remote token validation before every protected route

pub mod token_required;
