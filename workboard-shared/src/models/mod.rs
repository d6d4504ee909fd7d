/// Database models for Workboard
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts, login lookup, password-reset tokens
/// - `project`: Projects that group tasks
/// - `task`: Tasks assigned to a user within a project, plus the status
///   label table, display views, and in-memory filtering
///
/// # Example
///
/// ```no_run
/// use workboard_shared::models::user::{CreateUser, User};
/// use workboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     user_name: "jdoe".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     email: "jdoe@example.com".to_string(),
///     name: "John Doe".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod user;
