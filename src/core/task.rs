//! The task record and its wire contract.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::types::TaskId;

/// A single task record.
///
/// Exchanged over the wire and held in storage as a field-named record.
/// The identifier is assigned by the server at creation time and omitted
/// from the wire form until then; `state` is the only field an update may
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, absent until the record is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Short label. The only field a create request must carry.
    pub title: String,
    /// Free-form details, empty when not provided.
    #[serde(default)]
    pub description: String,
    /// Done / not done.
    #[serde(default)]
    pub state: bool,
    /// Priority flag, fixed at creation.
    #[serde(default)]
    pub priority: bool,
    /// RFC 3339 creation time, assigned by the server.
    #[serde(default)]
    pub created_at: String,
}

impl Task {
    /// Assign a fresh identifier and server-side creation time,
    /// discarding whatever the client may have supplied for either.
    pub fn with_fresh_identity(mut self) -> Self {
        self.id = Some(TaskId::new());
        self.created_at = Utc::now().to_rfc3339();
        self
    }
}
