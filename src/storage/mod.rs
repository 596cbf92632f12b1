//! Storage abstraction for persisting task records.
//!
//! This module provides a trait-based gateway over the backing document
//! store with pluggable backends (MongoDB, in-memory).

mod memory;
mod mongo;

pub use memory::InMemoryStore;
pub use mongo::{MongoStore, StoreConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::core::task::Task;
use crate::core::types::TaskId;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// A record with the same identifier already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The call did not complete before its deadline.
    #[error("store call exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    /// Store lock was poisoned.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Record could not be converted to or from its stored form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backing store failed or is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a delete call, as reported by the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Number of records removed; zero when the id matched nothing.
    pub deleted_count: u64,
}

/// Gateway over the document-store operations the service depends on.
///
/// Every call is bound to the caller-supplied deadline and returns
/// promptly once it elapses.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch every stored task.
    async fn find_all(&self, deadline: Duration) -> Result<Vec<Task>, StoreError>;

    /// Persist a new task. The task must already carry its identity.
    async fn insert(&self, task: Task, deadline: Duration) -> Result<(), StoreError>;

    /// Atomically set the completion state of one task and return the
    /// post-update record.
    async fn set_state(
        &self,
        id: &TaskId,
        state: bool,
        deadline: Duration,
    ) -> Result<Task, StoreError>;

    /// Remove a task, reporting how many records were affected.
    async fn delete(&self, id: &TaskId, deadline: Duration) -> Result<DeleteOutcome, StoreError>;
}

/// Run a store operation under a deadline.
///
/// Expiry surfaces as [`StoreError::DeadlineExceeded`]; the operation's
/// future is dropped at that point, releasing whatever it held.
pub(crate) async fn bounded<T, F>(deadline: Duration, op: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(deadline, op).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::DeadlineExceeded(deadline)),
    }
}
