//! API endpoints.

pub mod projects;
pub mod query;
pub mod tasks;
pub mod users;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::Method,
    routing::get,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use task_store::TaskStore;

use crate::error::{ServerError, ServerResult};
use crate::state::SharedState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Body of a successful update or delete.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "OK" }
    }
}

/// Decodes a JSON body, turning any failure into a 400.
///
/// The content type is not checked. Covers malformed JSON, unknown fields,
/// an empty body and bodies over [`MAX_BODY_BYTES`].
pub fn read_json<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> ServerResult<T> {
    let bytes = body.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ServerError::InvalidRequest(rejection.body_text())
    })?;

    serde_json::from_slice(&bytes).map_err(|err| {
        tracing::debug!(error = %err, "Malformed request body");
        ServerError::InvalidRequest(err.to_string())
    })
}

/// Rejects input that fails its validity predicate.
pub fn ensure_valid(valid: bool) -> ServerResult<()> {
    if valid {
        Ok(())
    } else {
        Err(ServerError::InvalidRequest("invalid request".to_string()))
    }
}

/// Creates the API router with all endpoints.
pub fn create_router<S: TaskStore>() -> Router<SharedState<S>> {
    Router::new()
        // User endpoints
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/users/search",
            get(users::search_users).fallback(method_not_allowed),
        )
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/users/:id/tasks",
            get(users::list_user_tasks).fallback(method_not_allowed),
        )
        // Task endpoints
        .route(
            "/tasks",
            get(tasks::list_tasks)
                .post(tasks::create_task)
                .fallback(method_not_allowed),
        )
        .route(
            "/tasks/search",
            get(tasks::search_tasks).fallback(method_not_allowed),
        )
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task)
                .fallback(method_not_allowed),
        )
        // Project endpoints
        .route(
            "/projects",
            get(projects::list_projects)
                .post(projects::create_project)
                .fallback(method_not_allowed),
        )
        .route(
            "/projects/search",
            get(projects::search_projects).fallback(method_not_allowed),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project)
                .fallback(method_not_allowed),
        )
        .route(
            "/projects/:id/tasks",
            get(projects::list_project_tasks).fallback(method_not_allowed),
        )
        // Health check
        .route("/health", get(health_check).fallback(method_not_allowed))
        .fallback(not_found)
}

/// Health check endpoint.
async fn health_check<S: TaskStore>(State(state): State<SharedState<S>>) -> Json<Value> {
    Json(json!({
        "status": "available",
        "system_info": {
            "environment": state.config.environment,
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

async fn not_found() -> ServerError {
    ServerError::NotFound
}

async fn method_not_allowed(method: Method) -> ServerError {
    ServerError::MethodNotAllowed(method)
}
