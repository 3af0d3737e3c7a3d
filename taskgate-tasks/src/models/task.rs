/// Task model
///
/// Tasks are soft-deleted: deleting one clears `is_active` and leaves the row
/// in place. Listing returns active tasks only; fetching by ID ignores the
/// flag.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     description TEXT NOT NULL,
///     created_on DATE NOT NULL,
///     deadline DATE NOT NULL,
///     status_id BIGINT NOT NULL REFERENCES statuses(id),
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_by TEXT NOT NULL
/// );
/// ```
///
/// # Wire format
///
/// Field names on the wire follow the public API, not the column names:
///
/// ```json
/// {
///   "id_task": 5,
///   "name_task": "x",
///   "desc_task": "y",
///   "created_of": "2024-01-15",
///   "deadline": "2024-02-01",
///   "status": "In progress",
///   "isActive": true,
///   "Created_by": "alice"
/// }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored task, referencing its status by ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Date the task was created
    pub created_on: NaiveDate,

    pub deadline: NaiveDate,

    /// Must always resolve to an existing status
    pub status_id: i64,

    /// `false` once soft-deleted
    pub is_active: bool,

    /// Username of the creator, taken from the verified identity
    pub created_by: String,
}

/// A task joined with its status name, as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskView {
    #[serde(rename = "id_task")]
    pub id: i64,

    #[serde(rename = "name_task")]
    pub name: String,

    #[serde(rename = "desc_task")]
    pub description: String,

    #[serde(rename = "created_of")]
    pub created_on: NaiveDate,

    pub deadline: NaiveDate,

    #[serde(rename = "status")]
    pub status_name: String,

    #[serde(rename = "isActive")]
    pub is_active: bool,

    #[serde(rename = "Created_by")]
    pub created_by: String,
}

impl TaskView {
    pub fn from_task(task: &Task, status_name: &str) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            created_on: task.created_on,
            deadline: task.deadline,
            status_name: status_name.to_string(),
            is_active: task.is_active,
            created_by: task.created_by.clone(),
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,

    pub description: String,

    pub created_on: NaiveDate,

    pub deadline: NaiveDate,

    pub status_id: i64,

    pub is_active: bool,

    pub created_by: String,
}

/// Partial update
///
/// The allow-list of updatable fields. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub name: Option<String>,

    pub description: Option<String>,

    pub deadline: Option<NaiveDate>,

    pub status_id: Option<i64>,

    pub is_active: Option<bool>,
}

impl TaskChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.status_id.is_none()
            && self.is_active.is_none()
    }

    /// Applies the supplied fields to `task`
    pub fn apply_to(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(status_id) = self.status_id {
            task.status_id = status_id;
        }
        if let Some(is_active) = self.is_active {
            task.is_active = is_active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Task {
        Task {
            id: 1,
            name: "Task 1".into(),
            description: "Task 1 description".into(),
            created_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            status_id: 1,
            is_active: true,
            created_by: "user1".into(),
        }
    }

    #[test]
    fn test_task_view_wire_names() {
        let view = TaskView::from_task(&task(), "In progress");
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["id_task"], 1);
        assert_eq!(json["name_task"], "Task 1");
        assert_eq!(json["desc_task"], "Task 1 description");
        assert_eq!(json["created_of"], "2024-01-01");
        assert_eq!(json["deadline"], "2024-01-05");
        assert_eq!(json["status"], "In progress");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["Created_by"], "user1");
    }

    #[test]
    fn test_changes_apply_only_supplied_fields() {
        let mut task = task();
        let changes = TaskChanges {
            name: Some("renamed".into()),
            status_id: Some(3),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        changes.apply_to(&mut task);

        assert_eq!(task.name, "renamed");
        assert_eq!(task.status_id, 3);
        assert_eq!(task.description, "Task 1 description");
        assert!(task.is_active);
    }

    #[test]
    fn test_empty_changes() {
        assert!(TaskChanges::default().is_empty());
    }
}
