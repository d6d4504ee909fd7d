/// Project service
///
/// Unlike users, project updates check existence first: an unknown id
/// answers 400 "Project not found". Lookups by id still report absence as
/// 200 with `null` data.

use sqlx::PgPool;
use validator::Validate;

use workboard_shared::{
    models::{
        project::{CreateProject, Project, UpdateProject},
        task::Task,
    },
    response::{ResponseBase, ServiceError},
};

use super::validation_message;

/// Domain service for projects
pub struct ProjectService {
    db: PgPool,
}

impl ProjectService {
    /// Creates a project service.
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a project; 200 with sentinel `1` on success.
    pub async fn create(&self, request: Option<CreateProject>) -> ResponseBase<i32> {
        match self.try_create(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_create(&self, request: Option<CreateProject>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        Project::create(&self.db, request).await?;

        Ok(1)
    }

    /// Replaces a project's fields after checking it exists.
    pub async fn update(&self, request: Option<UpdateProject>) -> ResponseBase<i32> {
        match self.try_update(request).await {
            Ok(data) => ResponseBase::ok(data, "Success"),
            Err(e) => e.into(),
        }
    }

    async fn try_update(&self, request: Option<UpdateProject>) -> Result<i32, ServiceError> {
        let request = request.ok_or_else(ServiceError::invalid_payload)?;
        request
            .validate()
            .map_err(|e| ServiceError::Validation(validation_message(&e)))?;

        if Project::find_by_id(&self.db, request.id).await?.is_none() {
            return Err(ServiceError::NotFound("Project not found".to_string()));
        }

        Project::update(&self.db, &request)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Project not found".to_string()))?;

        Ok(1)
    }

    /// Looks a project up by id; absence is 200 with `null` data.
    pub async fn get_by_id(&self, id: i32) -> ResponseBase<Project> {
        match Project::find_by_id(&self.db, id).await {
            Ok(project) => ResponseBase::ok_opt(project, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Lists all projects.
    pub async fn get_all(&self) -> ResponseBase<Vec<Project>> {
        match Project::list_all(&self.db).await {
            Ok(projects) => ResponseBase::ok(projects, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }

    /// Lists the tasks belonging to a project.
    pub async fn get_tasks(&self, project_id: i32) -> ResponseBase<Vec<Task>> {
        match Task::list_by_project(&self.db, project_id).await {
            Ok(tasks) => ResponseBase::ok(tasks, "Success"),
            Err(e) => ServiceError::from(e).into(),
        }
    }
}
