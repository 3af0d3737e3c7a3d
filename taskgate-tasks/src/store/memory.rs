/// In-memory task store
///
/// One `RwLock` guards tasks and statuses together, so the status check and
/// the write it guards happen under the same write lock.

use super::{StoreError, StoreResult, TaskStore};
use crate::models::{
    status::{default_statuses, Status},
    task::{NewTask, Task, TaskChanges, TaskView},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    tasks: BTreeMap<i64, Task>,
    statuses: BTreeMap<i64, String>,
    last_id: i64,
}

impl Tables {
    fn view(&self, task: &Task) -> TaskView {
        let status = self
            .statuses
            .get(&task.status_id)
            .map(String::as_str)
            .unwrap_or_default();
        TaskView::from_task(task, status)
    }
}

/// Task store backed by in-process maps
#[derive(Debug)]
pub struct MemoryTaskStore {
    tables: RwLock<Tables>,
}

impl MemoryTaskStore {
    /// Creates an empty store with the default statuses
    pub fn new() -> Self {
        let statuses = default_statuses()
            .into_iter()
            .map(|status| (status.id, status.name))
            .collect();

        Self {
            tables: RwLock::new(Tables {
                statuses,
                ..Default::default()
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_active(&self) -> StoreResult<Vec<TaskView>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|task| task.is_active)
            .map(|task| tables.view(task))
            .collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<TaskView>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).map(|task| tables.view(task)))
    }

    async fn create(&self, task: NewTask) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;

        if !tables.statuses.contains_key(&task.status_id) {
            return Err(StoreError::InvalidStatus(task.status_id));
        }

        tables.last_id += 1;
        let id = tables.last_id;
        tables.tasks.insert(
            id,
            Task {
                id,
                name: task.name,
                description: task.description,
                created_on: task.created_on,
                deadline: task.deadline,
                status_id: task.status_id,
                is_active: task.is_active,
                created_by: task.created_by,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: i64, changes: TaskChanges) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        if !tables.tasks.contains_key(&id) {
            return Err(StoreError::TaskNotFound(id));
        }
        if let Some(status_id) = changes.status_id {
            if !tables.statuses.contains_key(&status_id) {
                return Err(StoreError::InvalidStatus(status_id));
            }
        }

        if let Some(task) = tables.tasks.get_mut(&id) {
            changes.apply_to(task);
        }
        Ok(())
    }

    async fn deactivate(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let task = tables
            .tasks
            .get_mut(&id)
            .ok_or(StoreError::TaskNotFound(id))?;
        task.is_active = false;
        Ok(())
    }

    async fn list_statuses(&self) -> StoreResult<Vec<Status>> {
        let tables = self.tables.read().await;
        Ok(tables
            .statuses
            .iter()
            .map(|(id, name)| Status {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn count_active(&self) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.values().filter(|task| task.is_active).count() as i64)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.tasks.len() as i64)
    }
}
