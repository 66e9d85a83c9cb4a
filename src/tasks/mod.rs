mod ledger;
mod types;

#[cfg(test)]
mod tests;

pub use ledger::TaskLedger;
pub use types::{CompletedTask, LedgerStats, TaskReceipt, TaskRecord};

use anyhow::Result;

use crate::allocator::BucketSet;
use crate::lists::ItemId;

/// Sink for allocated buckets and source of finished work
pub trait TaskClient {
    /// Create one task holding `items`
    fn create_task(&mut self, title: &str, items: &[ItemId]) -> Result<TaskReceipt>;

    /// All tasks a worker has answered
    fn read_completed_tasks(&self) -> Result<Vec<CompletedTask>>;
}

/// Create one task per bucket from its real items, skipping buckets that
/// hold only fill slots
pub fn submit_buckets<C: TaskClient + ?Sized>(
    client: &mut C,
    title: &str,
    buckets: &BucketSet<ItemId>,
) -> Result<Vec<TaskReceipt>> {
    let mut receipts = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        let items = bucket.to_items();
        if items.is_empty() {
            continue;
        }
        receipts.push(client.create_task(title, &items)?);
    }
    Ok(receipts)
}
