/// PostgreSQL task store
///
/// Updates use a fixed column list with `COALESCE`, so each field is bound as
/// an optional parameter and no client-supplied name reaches the SQL text.
///
/// # Example
///
/// ```no_run
/// use taskgate_tasks::db::pool::{create_pool, DatabaseConfig};
/// use taskgate_tasks::store::{PgTaskStore, TaskStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgTaskStore::new(pool);
/// let tasks = store.list_active().await?;
/// # Ok(())
/// # }
/// ```

use super::{StoreError, StoreResult, TaskStore};
use crate::models::{
    status::Status,
    task::{NewTask, TaskChanges, TaskView},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Postgres error code for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SELECT_VIEW: &str = r#"
    SELECT t.id, t.name, t.description, t.created_on, t.deadline,
           s.name AS status_name, t.is_active, t.created_by
    FROM tasks t
    JOIN statuses s ON t.status_id = s.id
"#;

/// Task store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a foreign key violation on `status_id` to `InvalidStatus`
fn status_violation(err: sqlx::Error, status_id: i64) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            StoreError::InvalidStatus(status_id)
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_active(&self) -> StoreResult<Vec<TaskView>> {
        let query = format!("{} WHERE t.is_active = TRUE ORDER BY t.id", SELECT_VIEW);
        let tasks = sqlx::query_as::<_, TaskView>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<TaskView>> {
        let query = format!("{} WHERE t.id = $1", SELECT_VIEW);
        let task = sqlx::query_as::<_, TaskView>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(task)
    }

    async fn create(&self, task: NewTask) -> StoreResult<i64> {
        let status_id = task.status_id;
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (name, description, created_on, deadline, status_id, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(task.name)
        .bind(task.description)
        .bind(task.created_on)
        .bind(task.deadline)
        .bind(task.status_id)
        .bind(task.is_active)
        .bind(task.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| status_violation(e, status_id))?;

        Ok(id)
    }

    async fn update(&self, id: i64, changes: TaskChanges) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so concurrent updates to the same task serialize
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM tasks WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::TaskNotFound(id));
        }

        if let Some(status_id) = changes.status_id {
            let status: Option<i64> = sqlx::query_scalar("SELECT id FROM statuses WHERE id = $1")
                .bind(status_id)
                .fetch_optional(&mut *tx)
                .await?;
            if status.is_none() {
                return Err(StoreError::InvalidStatus(status_id));
            }
        }

        if !changes.is_empty() {
            sqlx::query(
                r#"
                UPDATE tasks
                SET name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    deadline = COALESCE($4, deadline),
                    status_id = COALESCE($5, status_id),
                    is_active = COALESCE($6, is_active)
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(changes.name)
            .bind(changes.description)
            .bind(changes.deadline)
            .bind(changes.status_id)
            .bind(changes.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn deactivate(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("UPDATE tasks SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::TaskNotFound(id));
        }
        Ok(())
    }

    async fn list_statuses(&self) -> StoreResult<Vec<Status>> {
        let statuses = sqlx::query_as::<_, Status>("SELECT id, name FROM statuses ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(statuses)
    }

    async fn count_active(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
