/// Task storage
///
/// Handlers talk to a [`TaskStore`] trait object so the service runs the same
/// against PostgreSQL in production and an in-memory map in tests and local
/// development.
///
/// - `memory`: `MemoryTaskStore`, lock-protected maps
/// - `postgres`: `PgTaskStore`, sqlx over a `PgPool`
///
/// # Invariants
///
/// - A task's `status_id` always resolves to an existing status. Create and
///   update check it and fail with [`StoreError::InvalidStatus`] without
///   writing anything.
/// - Deletion is soft: `deactivate` clears `is_active`; `get` still returns
///   the row.
/// - Concurrent writes to the same task are serialized; the last write wins.

pub mod memory;
pub mod postgres;

use crate::models::{
    status::Status,
    task::{NewTask, TaskChanges, TaskView},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

/// Task store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    TaskNotFound(i64),

    #[error("status {0} does not exist")]
    InvalidStatus(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Task record storage
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Active tasks joined with their status name, ordered by ID
    async fn list_active(&self) -> StoreResult<Vec<TaskView>>;

    /// A single task regardless of its active flag
    async fn get(&self, id: i64) -> StoreResult<Option<TaskView>>;

    /// Inserts a task and returns its new ID
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidStatus`] if `task.status_id` does not resolve.
    async fn create(&self, task: NewTask) -> StoreResult<i64>;

    /// Applies the supplied fields of `changes`
    ///
    /// # Errors
    ///
    /// [`StoreError::TaskNotFound`] is checked before
    /// [`StoreError::InvalidStatus`].
    async fn update(&self, id: i64, changes: TaskChanges) -> StoreResult<()>;

    /// Soft-deletes a task
    async fn deactivate(&self, id: i64) -> StoreResult<()>;

    async fn list_statuses(&self) -> StoreResult<Vec<Status>>;

    async fn count_active(&self) -> StoreResult<i64>;

    /// Every task, active or not
    async fn count_all(&self) -> StoreResult<i64>;
}

/// Inserts the demo tasks into an empty store
///
/// Returns the number of tasks inserted; zero when the store already holds
/// any task.
pub async fn seed_demo_tasks(store: &dyn TaskStore) -> StoreResult<usize> {
    if store.count_all().await? > 0 {
        return Ok(0);
    }

    let demo = [
        ("Task 1", 1, "user1"),
        ("Task 2", 2, "user1"),
        ("Task 3", 3, "user1"),
        ("Task 4", 1, "user2"),
    ];

    let created_on = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let deadline = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap_or_default();

    for (name, status_id, created_by) in demo {
        store
            .create(NewTask {
                name: name.to_string(),
                description: format!("{} description", name),
                created_on,
                deadline,
                status_id,
                is_active: true,
                created_by: created_by.to_string(),
            })
            .await?;
    }

    info!(count = demo.len(), "Seeded demo tasks");
    Ok(demo.len())
}
