/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     code VARCHAR(50) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

const PROJECT_COLUMNS: &str = "id, name, code, description, start_date, end_date, created_date";

/// Project model; owns zero or more tasks via `tasks.project_id`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: i32,

    /// Project name
    pub name: String,

    /// Short project code
    pub code: String,

    /// Free-form description
    pub description: String,

    /// Planned start
    pub start_date: DateTime<Utc>,

    /// Planned end
    pub end_date: DateTime<Utc>,

    /// When the project was created
    pub created_date: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Short project code
    #[validate(length(min = 1, max = 50, message = "Code must be 1-50 characters"))]
    pub code: String,

    /// Free-form description
    pub description: String,

    /// Planned start
    pub start_date: DateTime<Utc>,

    /// Planned end
    pub end_date: DateTime<Utc>,
}

/// Input for updating an existing project (full field replace keyed by `id`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProject {
    /// ID of the project to update
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
}

impl Project {
    /// Creates a new project
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, code, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(data.name)
        .bind(data.code)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Replaces a project's fields, returning the updated row if it exists
    pub async fn update(pool: &PgPool, data: &UpdateProject) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects
            SET name = $2, code = $3, description = $4, start_date = $5, end_date = $6
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.code)
        .bind(&data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id",
        ))
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }
}
