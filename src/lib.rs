pub mod api;
pub mod core;
pub mod storage;

pub use core::task::Task;
pub use core::types::{ParseTaskIdError, TaskId};
pub use storage::{DeleteOutcome, InMemoryStore, MongoStore, StoreConfig, StoreError, TaskStore};
