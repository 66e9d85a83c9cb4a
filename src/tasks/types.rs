use serde::{Deserialize, Serialize};

use crate::lists::ItemId;

/// A unit of remote work created from one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub items: Vec<ItemId>,
    /// SHA-256 over title and items, hex encoded
    pub digest: String,
    pub created_at: String,
}

/// Returned by `create_task`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReceipt {
    pub task_id: String,
    pub digest: String,
    pub item_count: usize,
}

/// A task together with the answer a worker submitted for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub task: TaskRecord,
    pub worker: String,
    pub answer: String,
    pub completed_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub task_count: u32,
    pub completed_count: u32,
}

impl LedgerStats {
    pub fn pending_count(&self) -> u32 {
        self.task_count - self.completed_count
    }
}
