/// User endpoints
///
/// # Endpoints
///
/// - `POST   /v1/users` - create
/// - `PUT    /v1/users` - full-field update (no existence check)
/// - `GET    /v1/users` - list all, newest id first
/// - `GET    /v1/users/filter?filter=...` - substring match on display name
/// - `GET    /v1/users/:id` - lookup (absence is 200 with null data)
/// - `DELETE /v1/users/:id` - delete
/// - `GET    /v1/users/:id/tasks?status=N` - the user's tasks, narrowed by
///   status when N > 0

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use workboard_shared::{
    models::{
        task::TaskView,
        user::{UpdateUser, User},
    },
    response::ResponseBase,
};

use crate::{app::AppState, services::users::CreateUserRequest};

/// Query for the name filter endpoint
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    /// Case-sensitive substring to match
    pub filter: Option<String>,
}

/// Query for the per-user tasks endpoint
#[derive(Debug, Deserialize)]
pub struct TasksByUserQuery {
    /// Status code; values > 0 narrow the list
    #[serde(default)]
    pub status: i32,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Option<Json<CreateUserRequest>>,
) -> Json<ResponseBase<i32>> {
    Json(state.user_service().create(payload.map(|Json(p)| p)).await)
}

pub async fn update(
    State(state): State<AppState>,
    payload: Option<Json<UpdateUser>>,
) -> Json<ResponseBase<i32>> {
    Json(state.user_service().update(payload.map(|Json(p)| p)).await)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Json<ResponseBase<i32>> {
    Json(state.user_service().delete(id).await)
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Json<ResponseBase<User>> {
    Json(state.user_service().get_by_id(id).await)
}

pub async fn list(State(state): State<AppState>) -> Json<ResponseBase<Vec<User>>> {
    Json(state.user_service().get_all().await)
}

pub async fn filter(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Json<ResponseBase<Vec<User>>> {
    Json(state.user_service().filter(query.filter).await)
}

pub async fn tasks_by_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<TasksByUserQuery>,
) -> Json<ResponseBase<Vec<TaskView>>> {
    Json(
        state
            .user_service()
            .get_tasks_by_user(id, query.status)
            .await,
    )
}
