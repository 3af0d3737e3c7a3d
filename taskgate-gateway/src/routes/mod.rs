/// HTTP route handlers
///
/// - `proxy`: Pass-through routes for auth, users and tasks
/// - `health`: Gateway root

pub mod health;
pub mod proxy;
