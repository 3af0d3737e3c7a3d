/// Database layer for the task service
///
/// Only used when `DATABASE_URL` is set; otherwise the service runs on the
/// in-memory store.
///
/// - `pool`: PostgreSQL connection pool with a health check
/// - `migrations`: Embedded schema migrations

pub mod migrations;
pub mod pool;
