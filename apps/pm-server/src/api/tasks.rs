//! Task API endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
};
use entities::{Task, TaskInput};
use task_store::{Repository, TaskStore};

use super::query::{TaskSearch, read_query, resolve};
use super::{CreatedResponse, StatusResponse, ensure_valid, read_json};
use crate::error::ServerResult;
use crate::state::SharedState;

/// Lists all tasks.
pub async fn list_tasks<S: TaskStore>(
    State(state): State<SharedState<S>>,
) -> ServerResult<Json<Vec<Task>>> {
    let tasks = state.store.tasks().get_all().await?;
    Ok(Json(tasks))
}

/// Creates a task.
pub async fn create_task<S: TaskStore>(
    State(state): State<SharedState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<(StatusCode, Json<CreatedResponse>)> {
    let input: TaskInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    let id = state.store.tasks().insert(&input).await?;

    tracing::info!(
        task_id = id,
        assignee_id = input.assignee_id,
        project_id = input.project_id,
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Gets a task by id.
pub async fn get_task<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Task>> {
    let task = state.store.tasks().get(&id).await?;
    Ok(Json(task))
}

/// Replaces a task.
pub async fn update_task<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<StatusResponse>> {
    let input: TaskInput = read_json(body)?;
    ensure_valid(input.is_valid())?;

    state.store.tasks().update(&id, &input).await?;

    tracing::info!(task_id = %id, "Task updated");

    Ok(Json(StatusResponse::ok()))
}

/// Deletes a task.
pub async fn delete_task<S: TaskStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state.store.tasks().delete(&id).await?;

    tracing::info!(task_id = %id, "Task deleted");

    Ok(Json(StatusResponse::ok()))
}

/// Searches tasks by title, status, priority, assignee or project.
pub async fn search_tasks<S: TaskStore>(
    State(state): State<SharedState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ServerResult<Json<Vec<Task>>> {
    let params: TaskSearch = read_query(query)?;
    let (field, value) = resolve(&params)?;
    let tasks = state.store.tasks().get_all_by(field, value).await?;
    Ok(Json(tasks))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::test_support::TestApp;

    fn titles(tasks: &Value) -> Vec<&str> {
        tasks
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = TestApp::new();
        let id = app
            .create(
                "/tasks",
                json!({
                    "title": "write docs",
                    "description": "api reference",
                    "priority": "high",
                    "status": "to do",
                    "assignee_id": 3,
                    "project_id": 7,
                    "completed": "2024-07-04"
                }),
            )
            .await;

        let (status, task) = app.get(&format!("/tasks/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(task["title"], "write docs");
        assert_eq!(task["description"], "api reference");
        assert_eq!(task["priority"], "high");
        assert_eq!(task["status"], "to do");
        assert_eq!(task["assignee_id"], 3);
        assert_eq!(task["project_id"], 7);
        assert_eq!(task["completed"], "2024-07-04");
    }

    #[tokio::test]
    async fn test_priority_alone_is_enough() {
        let app = TestApp::new();
        let (status, _) = app.post("/tasks", json!({ "priority": "HIGH" })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_negative_references_are_rejected() {
        let app = TestApp::new();
        let (status, _) = app
            .post(
                "/tasks",
                json!({ "title": "bad", "assignee_id": -1, "project_id": -1 }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_completed_date_is_server_error() {
        let app = TestApp::new();
        let (status, _) = app
            .post("/tasks", json!({ "title": "t", "completed": "tomorrow" }))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (_, tasks) = app.get("/tasks").await;
        assert_eq!(tasks, json!([]));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = TestApp::new();
        let id = app.create("/tasks", json!({ "title": "draft" })).await;

        let (status, _) = app
            .put(
                &format!("/tasks/{id}"),
                json!({ "title": "final", "status": "completed", "completed": "2024-08-01" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, task) = app.get(&format!("/tasks/{id}")).await;
        assert_eq!(task["title"], "final");
        assert_eq!(task["completed"], "2024-08-01");

        let (status, _) = app.delete(&format!("/tasks/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.delete(&format!("/tasks/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app.put(&format!("/tasks/{id}"), json!({ "title": "x" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search() {
        let app = TestApp::new();
        app.create(
            "/tasks",
            json!({ "title": "a", "priority": "high", "status": "to do", "project_id": 1 }),
        )
        .await;
        app.create(
            "/tasks",
            json!({ "title": "b", "priority": "low", "status": "to do", "assignee_id": 2 }),
        )
        .await;
        app.create(
            "/tasks",
            json!({ "title": "c", "priority": "high", "status": "in progress", "project_id": 1 }),
        )
        .await;

        let (_, found) = app.get("/tasks/search?priority=high").await;
        assert_eq!(titles(&found), vec!["a", "c"]);

        let (_, found) = app.get("/tasks/search?status=to%20do").await;
        assert_eq!(titles(&found), vec!["a", "b"]);

        let (_, found) = app.get("/tasks/search?assignee=2").await;
        assert_eq!(titles(&found), vec!["b"]);

        let (_, found) = app.get("/tasks/search?project=1").await;
        assert_eq!(titles(&found), vec!["a", "c"]);

        // status outranks priority
        let (_, found) = app
            .get("/tasks/search?priority=low&status=in%20progress")
            .await;
        assert_eq!(titles(&found), vec!["c"]);

        let (status, found) = app.get("/tasks/search?priority=low&priority=high").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&found), vec!["b"]);

        let (status, _) = app.get("/tasks/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
