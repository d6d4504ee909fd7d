/// Task model and database operations
///
/// Tasks are the core entity of Workboard: work items assigned to a user
/// within a project. This module also carries the process-wide status label
/// table, the display projection used by list endpoints, and the in-memory
/// criteria filter.
///
/// # Status codes
///
/// Status is stored as a raw integer; nothing validates transitions and any
/// value may be written. The label table is fixed:
///
/// | Code | Label    |
/// |------|----------|
/// | 0    | Backlog  |
/// | 1    | Doing    |
/// | 2    | Done     |
/// | 3    | Pending  |
/// | 4    | Canceled |
///
/// Any other code renders as "Backlog"; that default is deliberate, not an
/// error.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     code VARCHAR(50) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     status INTEGER NOT NULL DEFAULT 0,
///     project_id INTEGER NOT NULL REFERENCES projects(id),
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use workboard_shared::models::task::{CreateTask, Task, TaskStatus};
/// use chrono::{TimeZone, Utc};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     name: "Design API".to_string(),
///     code: "WB-1".to_string(),
///     description: String::new(),
///     start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     end_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
///     status: 1,
///     project_id: 1,
///     user_id: 5,
/// }).await?;
///
/// assert_eq!(TaskStatus::from_code(task.status).label(), "Doing");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

const TASK_COLUMNS: &str =
    "id, name, code, description, start_date, end_date, status, project_id, user_id, created_date";

/// Display format for dates in list/filter views (MM/dd/yyyy)
pub const VIEW_DATE_FORMAT: &str = "%m/%d/%Y";

/// Task status labels
///
/// A fixed label table, not a validated state machine. Use
/// [`TaskStatus::from_code`] to map a stored integer to its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet planned (also the fallback for unknown codes)
    Backlog,

    /// In progress
    Doing,

    /// Completed
    Done,

    /// Blocked, waiting on something
    Pending,

    /// Abandoned
    Canceled,
}

impl TaskStatus {
    /// Maps a stored status code to its label variant.
    ///
    /// Unknown codes fall back to `Backlog` by design; status is not a
    /// validated enum anywhere in the system.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => TaskStatus::Doing,
            2 => TaskStatus::Done,
            3 => TaskStatus::Pending,
            4 => TaskStatus::Canceled,
            _ => TaskStatus::Backlog,
        }
    }

    /// Human-readable label used in views and notification emails
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
            TaskStatus::Pending => "Pending",
            TaskStatus::Canceled => "Canceled",
        }
    }
}

/// Task model representing a work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i32,

    /// Task name
    pub name: String,

    /// Short task code
    pub code: String,

    /// Free-form description
    pub description: String,

    /// Planned start
    pub start_date: DateTime<Utc>,

    /// Planned end
    pub end_date: DateTime<Utc>,

    /// Raw status code (see the label table above)
    pub status: i32,

    /// Project this task belongs to
    pub project_id: i32,

    /// Assignee; task notifications go to this user's email
    pub user_id: i32,

    /// When the task was created
    pub created_date: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Task name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Short task code
    #[validate(length(min = 1, max = 50, message = "Code must be 1-50 characters"))]
    pub code: String,

    /// Free-form description
    pub description: String,

    /// Planned start
    pub start_date: DateTime<Utc>,

    /// Planned end
    pub end_date: DateTime<Utc>,

    /// Status code; any integer is accepted
    pub status: i32,

    /// Project the task belongs to
    pub project_id: i32,

    /// Assignee
    pub user_id: i32,
}

/// Input for updating an existing task (full field replace keyed by `id`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    /// ID of the task to update
    pub id: i32,

    /// New name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// New code
    #[validate(length(min = 1, max = 50, message = "Code must be 1-50 characters"))]
    pub code: String,

    /// New description
    pub description: String,

    /// New planned start
    pub start_date: DateTime<Utc>,

    /// New planned end
    pub end_date: DateTime<Utc>,

    /// New status code; any integer is accepted
    pub status: i32,

    /// New project
    pub project_id: i32,

    /// New assignee
    pub user_id: i32,
}

/// Read-only display projection of a task
///
/// Dates are pre-formatted `MM/dd/yyyy`; never persisted, constructed only
/// for list and filter responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task ID
    pub id: i32,

    /// Task name
    pub name: String,

    /// Short task code
    pub code: String,

    /// Free-form description
    pub description: String,

    /// Start date formatted `MM/dd/yyyy`
    pub start_date: String,

    /// End date formatted `MM/dd/yyyy`
    pub end_date: String,

    /// Raw status code
    pub status: i32,
}

impl TaskView {
    /// Builds the display projection for a task.
    pub fn from_task(task: &Task) -> Self {
        TaskView {
            id: task.id,
            name: task.name.clone(),
            code: task.code.clone(),
            description: task.description.clone(),
            start_date: task.start_date.format(VIEW_DATE_FORMAT).to_string(),
            end_date: task.end_date.format(VIEW_DATE_FORMAT).to_string(),
            status: task.status,
        }
    }
}

/// Criteria for narrowing a task collection
///
/// All fields are optional and AND-combine: a task must satisfy every
/// present criterion. The date pair applies only when both ends are present
/// and selects tasks whose own range contains the filter range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Keep tasks in this project
    pub project_id: Option<i32>,

    /// Keep tasks assigned to this user
    pub user_id: Option<i32>,

    /// Keep tasks with this status code
    pub status: Option<i32>,

    /// Range start; only applied together with `end_date`
    pub start_date: Option<DateTime<Utc>>,

    /// Range end; only applied together with `start_date`
    pub end_date: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// True when the task satisfies every present criterion.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project_id) = self.project_id {
            if task.project_id != project_id {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if task.user_id != user_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if !(task.start_date <= start && task.end_date >= end) {
                return false;
            }
        }
        true
    }

    /// Applies the filter to a loaded task collection.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (name, code, description, start_date, end_date, status, project_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.name)
        .bind(data.code)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .bind(data.project_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Replaces a task's fields, returning the updated row if it exists
    pub async fn update(pool: &PgPool, data: &UpdateTask) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET name = $2, code = $3, description = $4, start_date = $5,
                end_date = $6, status = $7, project_id = $8, user_id = $9
            WHERE id = $1
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .bind(data.project_id)
        .bind(data.user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all tasks
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY id",
        ))
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks belonging to a project
    pub async fn list_by_project(pool: &PgPool, project_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY id",
        ))
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks assigned to a user
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY id",
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks whose end date falls on the same calendar day as `moment`
    pub async fn list_ending_on(
        pool: &PgPool,
        moment: DateTime<Utc>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE end_date::date = $1::date ORDER BY id",
        ))
        .bind(moment)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}
