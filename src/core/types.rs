//! Core identifier types.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a task identifier cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid task id: {0}")]
pub struct ParseTaskIdError(pub String);

/// Unique identifier for a task record.
///
/// Wraps the document store's native ObjectId. On the wire it is a
/// 24-character hex string, never the driver's extended-JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(ObjectId);

impl TaskId {
    /// Generate a new unique identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Create a TaskId from an existing ObjectId.
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// Get the underlying ObjectId.
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ParseTaskIdError(s.to_string()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
