//! Project API endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
};
use entities::{Project, ProjectInput, Task, TaskField};
use task_store::{Repository, TaskStore};

use super::query::{ProjectSearch, read_query, resolve};
use super::{CreatedResponse, StatusResponse, ensure_valid, read_json};
use crate::error::ServerResult;
use crate::state::SharedState;

/// Lists all projects.
pub async fn list_projects<S: TaskStore>(
    State(state): State<SharedState<S>>,
) -> ServerResult<Json<Vec<Project>>> {
    let projects = state.store.projects().get_all().await?;
    Ok(Json(projects))
}

/// Creates a project.
pub async fn create_project<S: TaskStore>(
    State(state): State<SharedState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<(StatusCode, Json<CreatedResponse>)> {
    let input: ProjectInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    let id = state.store.projects().insert(&input).await?;

    tracing::info!(project_id = id, manager_id = input.manager_id, "Project created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Gets a project by id.
pub async fn get_project<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Project>> {
    let project = state.store.projects().get(&id).await?;
    Ok(Json(project))
}

/// Replaces a project.
pub async fn update_project<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<StatusResponse>> {
    let input: ProjectInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    state.store.projects().update(&id, &input).await?;

    tracing::info!(project_id = %id, "Project updated");

    Ok(Json(StatusResponse::ok()))
}

/// Deletes a project.
pub async fn delete_project<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state.store.projects().delete(&id).await?;

    tracing::info!(project_id = %id, "Project deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Lists the tasks belonging to a project.
pub async fn list_project_tasks<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Task>>> {
    state.store.projects().get(&id).await?;
    let tasks = state
        .store
        .tasks()
        .get_all_by(TaskField::ProjectId, &id)
        .await?;
    Ok(Json(tasks))
}

/// Searches projects by title or manager.
pub async fn search_projects<S: TaskStore>(
    State(state): State<SharedState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ServerResult<Json<Vec<Project>>> {
    let params: ProjectSearch = read_query(query)?;
    let (field, value) = resolve(&params)?;
    let projects = state.store.projects().get_all_by(field, value).await?;
    Ok(Json(projects))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_crud() {
        let app = TestApp::new();
        let id = app
            .create(
                "/projects",
                json!({ "title": "apollo", "description": "moon", "manager_id": 1 }),
            )
            .await;

        let (status, project) = app.get(&format!("/projects/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(project["title"], "apollo");
        assert_eq!(project["manager_id"], 1);
        assert_eq!(project["completed"], serde_json::Value::Null);

        let (status, _) = app
            .put(
                &format!("/projects/{id}"),
                json!({ "title": "apollo 11", "manager_id": 2, "completed": "1969-07-24" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, project) = app.get(&format!("/projects/{id}")).await;
        assert_eq!(project["title"], "apollo 11");
        assert_eq!(project["completed"], "1969-07-24");

        let (status, _) = app.delete(&format!("/projects/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.get(&format!("/projects/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_project_is_rejected() {
        let app = TestApp::new();
        let (status, _) = app
            .post("/projects", json!({ "title": "x", "manager_id": -5 }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post("/projects", json!({ "title": "x", "owner": 1 }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_project_tasks() {
        let app = TestApp::new();
        let project = app
            .create("/projects", json!({ "title": "apollo", "manager_id": 1 }))
            .await;
        app.create("/tasks", json!({ "title": "launch", "project_id": project }))
            .await;
        app.create("/tasks", json!({ "title": "other", "project_id": project + 1 }))
            .await;

        let (status, tasks) = app.get(&format!("/projects/{project}/tasks")).await;
        assert_eq!(status, StatusCode::OK);
        let tasks = tasks.as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["title"], "launch");

        let (status, _) = app.get("/projects/77/tasks").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search() {
        let app = TestApp::new();
        app.create("/projects", json!({ "title": "apollo", "manager_id": 1 }))
            .await;
        app.create("/projects", json!({ "title": "gemini", "manager_id": 2 }))
            .await;

        let (_, found) = app.get("/projects/search?manager=2").await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["title"], "gemini");

        let (_, found) = app.get("/projects/search?title=apollo&manager=2").await;
        assert_eq!(found[0]["title"], "apollo");

        let (status, found) = app.get("/projects/search?manager=1&manager=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);
        assert_eq!(found[0]["title"], "apollo");

        let (status, _) = app.get("/projects/search?manager=bob").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = app.get("/projects/search?title=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
