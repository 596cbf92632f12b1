//! API request handlers.
//!
//! Each handler composes one store call with request decoding and
//! response encoding; every store call carries its own deadline.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::core::task::Task;
use crate::core::types::TaskId;
use crate::storage::TaskStore;

use super::errors::ApiError;
use super::responses::{DeleteResponse, HealthResponse};

/// Deadline for the full-collection listing call.
const LIST_DEADLINE: Duration = Duration::from_secs(30);
/// Deadline for single-record store calls.
const WRITE_DEADLINE: Duration = Duration::from_secs(5);

/// Shared application state for API handlers.
pub struct ApiState<S: TaskStore> {
    pub store: Arc<S>,
}

impl<S: TaskStore> ApiState<S> {
    /// Create the state from a store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: TaskStore> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Body accepted by the state-update endpoint. Anything a client sends
/// alongside `state` is ignored.
#[derive(Debug, Deserialize)]
pub struct SetStateRequest {
    pub state: bool,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// List every stored task.
pub async fn list_tasks<S: TaskStore + 'static>(
    State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.find_all(LIST_DEADLINE).await?;
    Ok(Json(tasks))
}

/// Create a task. The server assigns the identifier and creation time;
/// client-supplied values for either are discarded.
pub async fn create_task<S: TaskStore + 'static>(
    State(state): State<ApiState<S>>,
    payload: Result<Json<Task>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(task) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let task = task.with_fresh_identity();
    state.store.insert(task.clone(), WRITE_DEADLINE).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Set the completion state of one task and return the updated record.
pub async fn set_task_state<S: TaskStore + 'static>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<SetStateRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id: TaskId = id.parse()?;
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let task = state.store.set_state(&id, body.state, WRITE_DEADLINE).await?;
    Ok(Json(task))
}

/// Delete a task, reporting how many records were removed.
pub async fn delete_task<S: TaskStore + 'static>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id: TaskId = id.parse()?;
    let outcome = state.store.delete(&id, WRITE_DEADLINE).await?;
    Ok(Json(DeleteResponse::from(outcome)))
}
