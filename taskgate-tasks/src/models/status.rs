/// Task status labels
///
/// Statuses are a fixed seed set. Tasks reference them by ID and a status is
/// never deleted once referenced.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE statuses (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL UNIQUE
/// );
/// ```

use serde::{Deserialize, Serialize};

/// Seeded status names; IDs are assigned 1..=4 in this order
pub const DEFAULT_STATUSES: [&str; 4] = ["In progress", "Revision", "Completed", "Paused"];

/// A lifecycle label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Status {
    pub id: i64,

    pub name: String,
}

/// The seed set as rows
pub fn default_statuses() -> Vec<Status> {
    DEFAULT_STATUSES
        .iter()
        .zip(1..)
        .map(|(name, id)| Status {
            id,
            name: name.to_string(),
        })
        .collect()
}
