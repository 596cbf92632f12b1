//! MongoDB store implementation.
//!
//! Holds the driver's connection pool for the lifetime of the process;
//! the pool is safe for concurrent use and clones of the store share it.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{bounded, DeleteOutcome, StoreError, TaskStore};
use crate::core::task::Task;
use crate::core::types::TaskId;

/// How long the startup connect and ping may take before giving up.
const CONNECT_DEADLINE: Duration = Duration::from_secs(10);

/// Connection settings for the MongoDB backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection string.
    pub uri: String,
    /// Database holding the task collection.
    pub database: String,
    /// Collection holding the task documents.
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "taskd".to_string(),
            collection: "tasks".to_string(),
        }
    }
}

/// MongoDB-backed task store.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    config: StoreConfig,
}

/// Stored shape of a task: `_id` carries the store's native ObjectId.
#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    state: bool,
    priority: bool,
    created_at: String,
}

impl From<TaskDocument> for Task {
    fn from(doc: TaskDocument) -> Self {
        Self {
            id: Some(TaskId::from_object_id(doc.id)),
            title: doc.title,
            description: doc.description,
            state: doc.state,
            priority: doc.priority,
            created_at: doc.created_at,
        }
    }
}

impl TryFrom<Task> for TaskDocument {
    type Error = StoreError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        let id = task
            .id
            .ok_or_else(|| StoreError::Serialization("task has no id".to_string()))?;
        Ok(Self {
            id: id.as_object_id(),
            title: task.title,
            description: task.description,
            state: task.state,
            priority: task.priority,
            created_at: task.created_at,
        })
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl MongoStore {
    /// Connect to the store and verify it responds to a ping.
    ///
    /// A failure here is fatal to the caller: the service must not start
    /// without its store.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let client = bounded(CONNECT_DEADLINE, async {
            let client = Client::with_uri_str(&config.uri)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            client
                .database(&config.database)
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| StoreError::Unavailable(format!("ping failed: {}", e)))?;
            Ok(client)
        })
        .await?;

        Ok(Self { client, config })
    }

    fn collection(&self) -> Collection<TaskDocument> {
        self.client
            .database(&self.config.database)
            .collection(&self.config.collection)
    }
}

#[async_trait]
impl TaskStore for MongoStore {
    async fn find_all(&self, deadline: Duration) -> Result<Vec<Task>, StoreError> {
        let collection = self.collection();
        bounded(deadline, async move {
            let cursor = collection.find(doc! {}).await?;
            let documents: Vec<TaskDocument> = cursor.try_collect().await?;
            Ok(documents.into_iter().map(Task::from).collect())
        })
        .await
    }

    async fn insert(&self, task: Task, deadline: Duration) -> Result<(), StoreError> {
        let collection = self.collection();
        let document = TaskDocument::try_from(task)?;
        bounded(deadline, async move {
            collection.insert_one(document).await?;
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
        let collection = self.collection();
        let filter = doc! { "_id": id.as_object_id() };
        let update = doc! { "$set": { "state": state } };
        bounded(deadline, async move {
            let updated = collection
                .find_one_and_update(filter, update)
                .return_document(ReturnDocument::After)
                .await?;
            updated
                .map(Task::from)
                .ok_or_else(|| StoreError::NotFound(format!("task: {}", id)))
        })
        .await
    }

    async fn delete(&self, id: &TaskId, deadline: Duration) -> Result<DeleteOutcome, StoreError> {
        let collection = self.collection();
        let filter = doc! { "_id": id.as_object_id() };
        bounded(deadline, async move {
            let result = collection.delete_one(filter).await?;
            Ok(DeleteOutcome {
                deleted_count: result.deleted_count,
            })
        })
        .await
    }
}
