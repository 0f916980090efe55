//! User API endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
};
use entities::{Task, TaskField, User, UserInput};
use task_store::{Repository, TaskStore};

use super::query::{UserSearch, read_query, resolve};
use super::{CreatedResponse, StatusResponse, ensure_valid, read_json};
use crate::error::ServerResult;
use crate::state::SharedState;

/// Lists all users.
pub async fn list_users<S: TaskStore>(
    State(state): State<SharedState<S>>,
) -> ServerResult<Json<Vec<User>>> {
    let users = state.store.users().get_all().await?;
    Ok(Json(users))
}

/// Creates a user.
pub async fn create_user<S: TaskStore>(
    State(state): State<SharedState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<(StatusCode, Json<CreatedResponse>)> {
    let input: UserInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    let id = state.store.users().insert(&input).await?;

    tracing::info!(user_id = id, "User created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Gets a user by id.
pub async fn get_user<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<User>> {
    let user = state.store.users().get(&id).await?;
    Ok(Json(user))
}

/// Replaces a user.
pub async fn update_user<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<StatusResponse>> {
    let input: UserInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    state.store.users().update(&id, &input).await?;

    tracing::info!(user_id = %id, "User updated");

    Ok(Json(StatusResponse::ok()))
}

/// Deletes a user.
pub async fn delete_user<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state.store.users().delete(&id).await?;

    tracing::info!(user_id = %id, "User deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Lists the tasks assigned to a user.
pub async fn list_user_tasks<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Task>>> {
    state.store.users().get(&id).await?;
    let tasks = state
        .store
        .tasks()
        .get_all_by(TaskField::AssigneeId, &id)
        .await?;
    Ok(Json(tasks))
}

/// Searches users by name or email.
pub async fn search_users<S: TaskStore>(
    State(state): State<SharedState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ServerResult<Json<Vec<User>>> {
    let params: UserSearch = read_query(query)?;
    let (field, value) = resolve(&params)?;
    let users = state.store.users().get_all_by(field, value).await?;
    Ok(Json(users))
}
