/// User service
///
/// CRUD, login, the password-reset flow, and per-user task views.
///
/// Two behaviors are inherited deliberately and covered by tests:
/// - `update` performs no existence check; overwriting a missing id still
///   reports success.
/// - `get_by_id` reports a missing row as 200 with `null` data.
///
/// Login mismatches answer with envelope code 500 and one fixed message that
/// never reveals whether the username or the password was wrong.

use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use workboard_shared::{
    auth::password,
    models::{
        task::{Task, TaskView},
        user::{CreateUser, UpdateUser, User},
    },
    notify::{password_reset_email, NotificationDispatcher},
    response::{ResponseBase, ServiceError},
};

use super::validation_message;

/// How long a password-reset token stays valid
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Registration request
///
/// Carries the plaintext password over the wire once; it is hashed before
/// anything is stored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login name
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub user_name: String,

    /// Plaintext password, hashed with Argon2id before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: String,
}

/// Domain service for user accounts
pub struct UserService {
    db: PgPool,
    mailer: NotificationDispatcher,
    from_address: String,
}

impl UserService {
    /// Creates a user service.
    pub fn new(db: PgPool, mailer: NotificationDispatcher, from_address: String) -> Self {
        Self {
            db,
            mailer,
            from_address,
        }
    }

    /// Registers a new user; 200 with sentinel `1` on success.
    pub async fn create(&self, request: Option<CreateUserRequest>) -> ResponseBase<i32> {
        match self.try_create(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_create(&self, request: Option<CreateUserRequest>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        let password_hash = password::hash_password(&request.password)?;

        User::create(
            &self.db,
            CreateUser {
                user_name: request.user_name,
                password_hash,
                email: request.email,
                name: request.name,
            },
        )
        .await?;

        Ok(1)
    }

    /// Overwrites a user's editable fields.
    ///
    /// No existence check: an id that matches nothing still reports success.
    pub async fn update(&self, request: Option<UpdateUser>) -> ResponseBase<i32> {
        match self.try_update(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_update(&self, request: Option<UpdateUser>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        let updated = User::update(&self.db, &request).await?;
        if !updated {
            tracing::warn!(
                user_id = request.id,
                "User update matched no rows, reporting success anyway"
            );
        }

        Ok(1)
    }

    /// Deletes a user by id; a missing id is a 400.
    pub async fn delete(&self, id: i32) -> ResponseBase<i32> {
        match self.try_delete(id).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_delete(&self, id: i32) -> Result<i32, ServiceError> {
        if !User::delete(&self.db, id).await? {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        Ok(1)
    }

    /// Looks a user up by id; absence is 200 with `null` data.
    pub async fn get_by_id(&self, id: i32) -> ResponseBase<User> {
        match User::find_by_id(&self.db, id).await {
            Ok(user) => ResponseBase::ok_opt(user, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Lists all users, newest id first.
    pub async fn get_all(&self) -> ResponseBase<Vec<User>> {
        match User::list_all(&self.db).await {
            Ok(users) => ResponseBase::ok(users, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Narrows the user list by a case-sensitive substring of the display
    /// name, applied client-side over the full loaded set.
    pub async fn filter(&self, filter: Option<String>) -> ResponseBase<Vec<User>> {
        match self.try_filter(filter).await {
            Ok(users) => ResponseBase::ok(users, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_filter(&self, filter: Option<String>) -> Result<Vec<User>, ServiceError> {
        let users = User::list_all(&self.db).await?;

        let users = match filter {
            Some(needle) if !needle.is_empty() => users
                .into_iter()
                .filter(|u| u.name.contains(&needle))
                .collect(),
            _ => users,
        };

        Ok(users)
    }

    /// Authenticates a user; any mismatch answers 500 with a generic message.
    pub async fn login(&self, user_name: &str, password_input: &str) -> ResponseBase<User> {
        match self.try_login(user_name, password_input).await {
            Ok(user) => ResponseBase::ok(user, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_login(
        &self,
        user_name: &str,
        password_input: &str,
    ) -> Result<User, ServiceError> {
        let user = User::find_by_user_name(&self.db, user_name)
            .await?
            .ok_or(ServiceError::BadCredentials)?;

        if !password::verify_password(password_input, &user.password_hash)? {
            return Err(ServiceError::BadCredentials);
        }

        Ok(user)
    }

    /// Starts the password-reset flow for a matching username/email pair.
    ///
    /// Stores a fresh one-time token and emails it to the stored address.
    /// The password itself never leaves the system.
    pub async fn forgot_password(&self, user_name: &str, email: &str) -> ResponseBase<i32> {
        match self.try_forgot_password(user_name, email).await {
            Ok(data) => ResponseBase::ok(data, "Forgot password success"),
            Err(e) => e.into(),
        }
    }

    async fn try_forgot_password(&self, user_name: &str, email: &str) -> Result<i32, ServiceError> {
        let user = User::find_by_user_name_and_email(&self.db, user_name, email)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User does not exist".to_string()))?;

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        User::set_reset_token(&self.db, user.id, &token, expires_at).await?;

        self.mailer.dispatch(password_reset_email(
            &self.from_address,
            &user.email,
            &user.user_name,
            &token,
        ));

        Ok(0)
    }

    /// Tasks assigned to a user, narrowed by status when `status > 0`,
    /// projected for display.
    pub async fn get_tasks_by_user(&self, user_id: i32, status: i32) -> ResponseBase<Vec<TaskView>> {
        match self.try_get_tasks_by_user(user_id, status).await {
            Ok(views) => ResponseBase::ok(views, "Filter success"),
            Err(e) => e.into(),
        }
    }

    async fn try_get_tasks_by_user(
        &self,
        user_id: i32,
        status: i32,
    ) -> Result<Vec<TaskView>, ServiceError> {
        let mut tasks = Task::list_by_user(&self.db, user_id).await?;

        if status > 0 {
            tasks.retain(|t| t.status == status);
        }

        Ok(tasks.iter().map(TaskView::from_task).collect())
    }
}
