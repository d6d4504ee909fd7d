/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing
/// accounts. Passwords are stored as Argon2id hashes; the hash and the
/// password-reset fields are never serialized into responses.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     user_name VARCHAR(100) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     name VARCHAR(255) NOT NULL,
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     reset_token VARCHAR(64),
///     reset_token_expires_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use workboard_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     user_name: "jdoe".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     email: "jdoe@example.com".to_string(),
///     name: "John Doe".to_string(),
/// }).await?;
///
/// let found = User::find_by_user_name(&pool, "jdoe").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

const USER_COLUMNS: &str =
    "id, user_name, password_hash, email, name, created_date, reset_token, reset_token_expires_at";

/// User model representing an account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i32,

    /// Login name, unique across all users
    pub user_name: String,

    /// Argon2id password hash; never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Email address notifications are sent to
    pub email: String,

    /// Display name
    pub name: String,

    /// When the account was created
    pub created_date: DateTime<Utc>,

    /// Outstanding password-reset token, if any; never serialized
    #[serde(skip_serializing, default)]
    pub reset_token: Option<String>,

    /// When the outstanding reset token expires; never serialized
    #[serde(skip_serializing, default)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name
    pub user_name: String,

    /// Argon2id password hash (NOT a plaintext password)
    pub password_hash: String,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,
}

/// Input for updating an existing user
///
/// A full field replace keyed by `id`. The password is not part of the
/// update surface; it only changes through the reset flow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    /// ID of the user to overwrite
    pub id: i32,

    /// New login name
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub user_name: String,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// New display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique constraint)
    /// or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_name, password_hash, email, name)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.user_name)
        .bind(data.password_hash)
        .bind(data.email)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by login name (exact, case-sensitive match)
    pub async fn find_by_user_name(
        pool: &PgPool,
        user_name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name = $1",
        ))
        .bind(user_name)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by login name and email together
    ///
    /// Used by the password-reset flow, where both must match.
    pub async fn find_by_user_name_and_email(
        pool: &PgPool,
        user_name: &str,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name = $1 AND email = $2",
        ))
        .bind(user_name)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Overwrites a user's editable fields
    ///
    /// No existence check: an id that matches nothing updates zero rows and
    /// this still returns `Ok(false)`. Callers that treat that as success do
    /// so knowingly.
    pub async fn update(pool: &PgPool, data: &UpdateUser) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = $2, email = $3, name = $4
            WHERE id = $1
            "#,
        )
        .bind(data.id)
        .bind(&data.user_name)
        .bind(&data.email)
        .bind(&data.name)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user by ID
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all users, newest id first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id DESC",
        ))
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Stores a one-time password-reset token with its expiry
    pub async fn set_reset_token(
        pool: &PgPool,
        id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET reset_token = $2, reset_token_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
