/// Task endpoints
///
/// # Endpoints
///
/// - `POST /v1/tasks` - create (notifies the assignee)
/// - `PUT  /v1/tasks` - full-field update (notifies the assignee)
/// - `GET  /v1/tasks` - list all, projected for display
/// - `GET  /v1/tasks/filter?filter=...` - substring match on name or code
/// - `POST /v1/tasks/search` - AND-combined criteria filter
/// - `GET  /v1/tasks/ending-today` - tasks whose end date is today
/// - `GET  /v1/tasks/:id` - lookup (absence is 200 with null data)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use workboard_shared::{
    models::task::{CreateTask, Task, TaskFilter, TaskView, UpdateTask},
    response::ResponseBase,
};

use crate::app::AppState;

/// Query for the text filter endpoint
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    /// Case-sensitive substring to match against name or code
    pub filter: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Option<Json<CreateTask>>,
) -> Json<ResponseBase<i32>> {
    Json(state.task_service().create(payload.map(|Json(p)| p)).await)
}

pub async fn update(
    State(state): State<AppState>,
    payload: Option<Json<UpdateTask>>,
) -> Json<ResponseBase<i32>> {
    Json(state.task_service().update(payload.map(|Json(p)| p)).await)
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Json<ResponseBase<Task>> {
    Json(state.task_service().get_by_id(id).await)
}

pub async fn list(State(state): State<AppState>) -> Json<ResponseBase<Vec<TaskView>>> {
    Json(state.task_service().get_all().await)
}

pub async fn filter(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<ResponseBase<Vec<TaskView>>> {
    Json(state.task_service().filter(query.filter).await)
}

pub async fn search(
    State(state): State<AppState>,
    payload: Option<Json<TaskFilter>>,
) -> Json<ResponseBase<Vec<TaskView>>> {
    Json(
        state
            .task_service()
            .filter_tasks(payload.map(|Json(p)| p))
            .await,
    )
}

pub async fn ending_today(State(state): State<AppState>) -> Json<ResponseBase<Vec<Task>>> {
    Json(state.task_service().ending_today().await)
}
