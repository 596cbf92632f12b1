//! In-memory store implementation.
//!
//! Provides a thread-safe backend for testing and development.
//! Data is not persisted across restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use super::{bounded, DeleteOutcome, StoreError, TaskStore};
use crate::core::task::Task;
use crate::core::types::TaskId;

/// In-memory task store backed by a `RwLock`-guarded map.
pub struct InMemoryStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn find_all(&self, deadline: Duration) -> Result<Vec<Task>, StoreError> {
        bounded(deadline, async {
            let tasks = self.tasks.read().map_err(|_| StoreError::LockPoisoned)?;
            let mut result: Vec<_> = tasks.values().cloned().collect();
            result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(result)
        })
        .await
    }

    async fn insert(&self, task: Task, deadline: Duration) -> Result<(), StoreError> {
        bounded(deadline, async {
            let id = task
                .id
                .ok_or_else(|| StoreError::Serialization("task has no id".to_string()))?;
            let mut tasks = self.tasks.write().map_err(|_| StoreError::LockPoisoned)?;
            if tasks.contains_key(&id) {
                return Err(StoreError::DuplicateKey(format!("task: {}", id)));
            }
            tasks.insert(id, task);
            Ok(())
        })
        .await
    }

    async fn set_state(
        &self,
        id: &TaskId,
        state: bool,
        deadline: Duration,
    ) -> Result<Task, StoreError> {
        bounded(deadline, async {
            let mut tasks = self.tasks.write().map_err(|_| StoreError::LockPoisoned)?;
            let task = tasks
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("task: {}", id)))?;
            task.state = state;
            Ok(task.clone())
        })
        .await
    }

    async fn delete(&self, id: &TaskId, deadline: Duration) -> Result<DeleteOutcome, StoreError> {
        bounded(deadline, async {
            let mut tasks = self.tasks.write().map_err(|_| StoreError::LockPoisoned)?;
            let deleted_count = u64::from(tasks.remove(id).is_some());
            Ok(DeleteOutcome { deleted_count })
        })
        .await
    }
}
