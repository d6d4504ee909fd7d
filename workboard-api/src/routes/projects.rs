/// Project endpoints
///
/// # Endpoints
///
/// - `POST /v1/projects` - create
/// - `PUT  /v1/projects` - full-field update (404-style misses answer 400)
/// - `GET  /v1/projects` - list all
/// - `GET  /v1/projects/:id` - lookup (absence is 200 with null data)
/// - `GET  /v1/projects/:id/tasks` - the project's tasks

use axum::{
    extract::{Path, State},
    Json,
};

use workboard_shared::{
    models::{
        project::{CreateProject, Project, UpdateProject},
        task::Task,
    },
    response::ResponseBase,
};

use crate::app::AppState;

pub async fn create(
    State(state): State<AppState>,
    payload: Option<Json<CreateProject>>,
) -> Json<ResponseBase<i32>> {
    Json(
        state
            .project_service()
            .create(payload.map(|Json(p)| p))
            .await,
    )
}

pub async fn update(
    State(state): State<AppState>,
    payload: Option<Json<UpdateProject>>,
) -> Json<ResponseBase<i32>> {
    Json(
        state
            .project_service()
            .update(payload.map(|Json(p)| p))
            .await,
    )
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Json<ResponseBase<Project>> {
    Json(state.project_service().get_by_id(id).await)
}

pub async fn list(State(state): State<AppState>) -> Json<ResponseBase<Vec<Project>>> {
    Json(state.project_service().get_all().await)
}

pub async fn tasks(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Json<ResponseBase<Vec<Task>>> {
    Json(state.project_service().get_tasks(id).await)
}
