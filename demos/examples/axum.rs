//! Axum Integration Example
//!
//! Demonstrates conditional requests with the Axum web framework.
//!
//! Features shown:
//! - The Conditional layer answering GET revalidation with 304 Not Modified
//! - Per-resource strong ETags and Last-Modified timestamps
//! - Optimistic concurrency on PUT: the handler checks If-Match itself,
//!   before mutating, and answers 412 Precondition Failed on a lost update
//!
//! Run:
//!   cargo run -p conditional-demos --example axum
//!
//! Endpoints:
//!   - GET http://localhost:3000/tasks        - Task list (weak ETag)
//!   - GET http://localhost:3000/tasks/{id}   - Task details (strong ETag)
//!   - PUT http://localhost:3000/tasks/{id}   - Rename a task (If-Match aware)
//!   - GET http://localhost:3000/health       - Health check
//!
//! Try it:
//!   curl -v http://localhost:3000/tasks/1                          # note the ETag
//!   curl -v -H 'If-None-Match: "1-0"' http://localhost:3000/tasks/1  # 304
//!   curl -v -X PUT -H 'If-Match: "1-0"' -H 'Content-Type: application/json' \
//!     -d '{"title":"Renamed"}' http://localhost:3000/tasks/1       # 200, ETag "1-1"
//!   curl -v -X PUT -H 'If-Match: "1-0"' -H 'Content-Type: application/json' \
//!     -d '{"title":"Again"}' http://localhost:3000/tasks/1         # 412

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, SubsecRound, Utc};
use conditional_core::format_http_date;
use conditional_http::{OwnedPreconditions, Validators, outcome_status};
use conditional_tower::Conditional;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

// Domain Types

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub version: u64,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    fn new(id: u32, title: &str) -> Self {
        Task {
            id,
            title: title.into(),
            version: 0,
            updated_at: Utc::now().trunc_subsecs(0),
        }
    }

    fn etag(&self) -> String {
        format!("\"{}-{}\"", self.id, self.version)
    }

    fn validators(&self) -> Validators {
        Validators::new()
            .with_etag(self.etag())
            .with_last_modified(self.updated_at)
    }

    fn into_response(self) -> Response {
        (
            [
                (header::ETAG, self.etag()),
                (header::LAST_MODIFIED, format_http_date(self.updated_at)),
            ],
            Json(self),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct Rename {
    pub title: String,
}

type Tasks = Arc<RwLock<Vec<Task>>>;

// Handlers

async fn list_tasks(State(tasks): State<Tasks>) -> Response {
    let tasks = tasks.read().await.clone();
    let revision: u64 = tasks.iter().map(|t| t.version).sum();

    (
        [(header::ETAG, format!("W/\"list-{}-{}\"", tasks.len(), revision))],
        Json(tasks),
    )
        .into_response()
}

async fn get_task(State(tasks): State<Tasks>, Path(task_id): Path<u32>) -> Response {
    tracing::info!("Fetching task details: id={}", task_id);

    let tasks = tasks.read().await;
    match tasks.iter().find(|t| t.id == task_id) {
        Some(task) => task.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn rename_task(
    State(tasks): State<Tasks>,
    Path(task_id): Path<u32>,
    method: Method,
    headers: HeaderMap,
    Json(rename): Json<Rename>,
) -> Response {
    let mut tasks = tasks.write().await;
    let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    // Preconditions are evaluated against the current state, before the write.
    let outcome = OwnedPreconditions::from_parts(&method, &headers).evaluate(&task.validators());
    if let Some(status) = outcome_status(outcome) {
        tracing::info!(task_id, %outcome, "Rejecting update");
        return status.into_response();
    }

    task.title = rename.title;
    task.version += 1;
    task.updated_at = Utc::now().trunc_subsecs(0);
    tracing::info!(task_id, version = task.version, "Task renamed");

    task.clone().into_response()
}

async fn health() -> &'static str {
    "OK"
}

// Main

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter("debug,conditional_core=trace,conditional_tower=trace")
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let tasks: Tasks = Arc::new(RwLock::new(vec![
        Task::new(1, "Set up project structure"),
        Task::new(2, "Implement authentication"),
        Task::new(3, "Write unit tests"),
    ]));

    // The layer only wraps the GET handlers. It evaluates after the handler
    // has run, so mutating routes check their preconditions themselves.
    let app = Router::new()
        .route("/tasks", get(list_tasks).layer(Conditional::new()))
        .route(
            "/tasks/{task_id}",
            get(get_task).layer(Conditional::new()).put(rename_task),
        )
        .route("/health", get(health))
        .with_state(tasks);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("Failed to bind to port 3000");
    tracing::info!("Listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Server error");
}
