/// Task service
///
/// CRUD plus the filter/view operations, with an email notification to the
/// assignee on every create and update. The notification is dispatched
/// fire-and-forget: it adds no latency to the operation and its outcome is
/// discarded.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use validator::Validate;

use workboard_shared::{
    models::{
        task::{CreateTask, Task, TaskFilter, TaskView, UpdateTask},
        user::User,
    },
    notify::{task_update_email, NotificationDispatcher},
    response::{ResponseBase, ServiceError},
};

use super::validation_message;

/// Domain service for tasks
pub struct TaskService {
    db: PgPool,
    mailer: NotificationDispatcher,
    from_address: String,
    link_base: String,
}

impl TaskService {
    /// Creates a task service.
    pub fn new(
        db: PgPool,
        mailer: NotificationDispatcher,
        from_address: String,
        link_base: String,
    ) -> Self {
        Self {
            db,
            mailer,
            from_address,
            link_base,
        }
    }

    /// Creates a task and notifies the assignee; 200 with sentinel `1`.
    pub async fn create(&self, request: Option<CreateTask>) -> ResponseBase<i32> {
        match self.try_create(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_create(&self, request: Option<CreateTask>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        let task = Task::create(&self.db, request).await?;
        self.notify_assignee(&task).await;

        Ok(1)
    }

    /// Replaces a task's fields after checking it exists, then notifies the
    /// assignee.
    pub async fn update(&self, request: Option<UpdateTask>) -> ResponseBase<i32> {
        match self.try_update(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_update(&self, request: Option<UpdateTask>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        if Task::find_by_id(&self.db, request.id).await?.is_none() {
            return Err(ServiceError::NotFound("Task not found".to_string()));
        }

        let task = Task::update(&self.db, &request)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;
        self.notify_assignee(&task).await;

        Ok(1)
    }

    /// Looks a task up by id; absence is 200 with `null` data.
    pub async fn get_by_id(&self, id: i32) -> ResponseBase<Task> {
        match Task::find_by_id(&self.db, id).await {
            Ok(task) => ResponseBase::ok_opt(task, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Lists all tasks, projected for display.
    pub async fn get_all(&self) -> ResponseBase<Vec<TaskView>> {
        match Task::list_all(&self.db).await {
            Ok(tasks) => {
                ResponseBase::ok(tasks.iter().map(TaskView::from_task).collect(), "Success")
            }
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Narrows the task list by a case-sensitive substring of name or code,
    /// applied client-side over the full loaded set.
    pub async fn filter(&self, filter: Option<String>) -> ResponseBase<Vec<TaskView>> {
        match self.try_filter(filter).await {
            Ok(views) => ResponseBase::ok(views, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_filter(&self, filter: Option<String>) -> Result<Vec<TaskView>, ServiceError> {
        let tasks = Task::list_all(&self.db).await?;

        let tasks = match filter {
            Some(needle) if !needle.is_empty() => tasks
                .into_iter()
                .filter(|t| t.name.contains(&needle) || t.code.contains(&needle))
                .collect(),
            _ => tasks,
        };

        Ok(tasks.iter().map(TaskView::from_task).collect())
    }

    /// AND-combines the given criteria over the in-memory task collection.
    pub async fn filter_tasks(&self, filter: Option<TaskFilter>) -> ResponseBase<Vec<TaskView>> {
        match self.try_filter_tasks(filter).await {
            Ok(views) => ResponseBase::ok(views, "Filter success"),
            Err(e) => e.into(),
        }
    }

    async fn try_filter_tasks(
        &self,
        filter: Option<TaskFilter>,
    ) -> Result<Vec<TaskView>, ServiceError> {
        let filter = filter.ok_or_else(ServiceError::invalid_payload)?;

        let tasks = filter.apply(Task::list_all(&self.db).await?);

        Ok(tasks.iter().map(TaskView::from_task).collect())
    }

    /// Tasks whose end date falls on the current day.
    ///
    /// The clock is shifted back one hour so a sweep shortly after midnight
    /// still reports the day that just ended.
    pub async fn ending_today(&self) -> ResponseBase<Vec<Task>> {
        let moment = Utc::now() - Duration::hours(1);

        match Task::list_ending_on(&self.db, moment).await {
            Ok(tasks) => ResponseBase::ok(tasks, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Renders and dispatches the task notification to the assignee's
    /// stored email. Best-effort: a failed assignee lookup is logged and
    /// skipped, and the dispatch outcome is never observed.
    async fn notify_assignee(&self, task: &Task) {
        let user = match User::find_by_id(&self.db, task.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(
                    task_id = task.id,
                    user_id = task.user_id,
                    "Assignee not found, skipping notification"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    task_id = task.id,
                    error = %e,
                    "Assignee lookup failed, skipping notification"
                );
                return;
            }
        };

        self.mailer.dispatch(task_update_email(
            &self.from_address,
            &user.email,
            task,
            &self.link_base,
            Utc::now(),
        ));
    }
}
