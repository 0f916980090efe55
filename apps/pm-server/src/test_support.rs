//! Router harness for handler tests.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use serde_json::Value;
use task_store::MemoryTaskStore;
use tower::ServiceExt;

use crate::{config::Config, create_app, create_state};

/// The full application over a fresh in-memory store.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = create_state(Config::default(), MemoryTaskStore::new());
        Self {
            router: create_app(state),
        }
    }

    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.raw(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(json_request("GET", uri, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, Some(body))).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, Some(body))).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(json_request("DELETE", uri, None)).await
    }

    /// Creates a record and returns its id.
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let (status, body) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::CREATED, "create {uri} failed: {body}");
        body["id"].as_i64().unwrap()
    }
}

/// Builds a request with a JSON content type.
pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

/// Builds a request carrying `body` under an arbitrary content type, or none.
pub fn body_request(
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &Value,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
