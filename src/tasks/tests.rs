use super::*;
use crate::allocator::{Bucket, BucketConfig, BucketPlan, Slot, create_buckets_with_seed};

fn ledger() -> TaskLedger {
    TaskLedger::new_in_memory().unwrap()
}

#[test]
fn test_create_and_fetch_task() {
    let mut ledger = ledger();
    let receipt = ledger.create_task("Sort the slides", &[4, 8, 15]).unwrap();

    assert_eq!(receipt.item_count, 3);
    assert_eq!(receipt.digest.len(), 64);

    let task = ledger.get_task(&receipt.task_id).unwrap().unwrap();
    assert_eq!(task.title, "Sort the slides");
    assert_eq!(task.items, vec![4, 8, 15]);
    assert_eq!(task.digest, receipt.digest);
}

#[test]
fn test_digest_depends_on_content() {
    let mut ledger = ledger();
    let a = ledger.create_task("t", &[1, 2]).unwrap();
    let b = ledger.create_task("t", &[1, 2]).unwrap();
    let c = ledger.create_task("t", &[2, 1]).unwrap();
    let d = ledger.create_task("u", &[1, 2]).unwrap();

    assert_ne!(a.task_id, b.task_id);
    assert_eq!(a.digest, b.digest);
    assert_ne!(a.digest, c.digest);
    assert_ne!(a.digest, d.digest);
}

#[test]
fn test_empty_task_rejected() {
    let mut ledger = ledger();
    assert!(ledger.create_task("nothing", &[]).is_err());
    assert_eq!(ledger.get_stats().unwrap().task_count, 0);
}

#[test]
fn test_unknown_task_lookup() {
    let ledger = ledger();
    assert!(ledger.get_task("missing").unwrap().is_none());
    assert!(ledger.complete_task("missing", "w1", "a").is_err());
}

#[test]
fn test_complete_and_read_back() {
    let mut ledger = ledger();
    let first = ledger.create_task("t", &[1, 2, 3]).unwrap();
    let second = ledger.create_task("t", &[4, 5, 6]).unwrap();

    assert!(ledger.read_completed_tasks().unwrap().is_empty());
    assert_eq!(ledger.pending_tasks().unwrap().len(), 2);

    ledger.complete_task(&second.task_id, "worker-7", "3,1,2").unwrap();

    let completed = ledger.read_completed_tasks().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].task.id, second.task_id);
    assert_eq!(completed[0].task.items, vec![4, 5, 6]);
    assert_eq!(completed[0].worker, "worker-7");
    assert_eq!(completed[0].answer, "3,1,2");

    let pending = ledger.pending_tasks().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, first.task_id);

    let stats = ledger.get_stats().unwrap();
    assert_eq!(stats.task_count, 2);
    assert_eq!(stats.completed_count, 1);
    assert_eq!(stats.pending_count(), 1);
}

#[test]
fn test_complete_twice_rejected() {
    let mut ledger = ledger();
    let receipt = ledger.create_task("t", &[9]).unwrap();

    ledger.complete_task(&receipt.task_id, "w", "a").unwrap();
    assert!(ledger.complete_task(&receipt.task_id, "w", "b").is_err());
    assert_eq!(ledger.read_completed_tasks().unwrap()[0].answer, "a");
}

#[test]
fn test_submit_buckets_one_task_per_bucket() {
    let lists: Vec<Vec<ItemId>> = vec![(0..10).collect(), (10..20).collect(), (20..25).collect()];
    let set = create_buckets_with_seed(&lists, &BucketConfig::new(5), 3).unwrap();
    let mut ledger = ledger();

    let receipts = submit_buckets(&mut ledger, "batch", &set).unwrap();

    assert_eq!(receipts.len(), set.len());
    for (receipt, bucket) in receipts.iter().zip(&set) {
        let task = ledger.get_task(&receipt.task_id).unwrap().unwrap();
        assert_eq!(task.items, bucket.to_items());
    }
}

#[test]
fn test_submit_buckets_skips_fill_only_buckets() {
    let set = BucketSet {
        plan: BucketPlan {
            number_of_lists: 1,
            max_length: 1,
            uniform_length: 1,
            bucket_size: 2,
            number_of_buckets: 2,
        },
        buckets: vec![
            Bucket {
                slots: vec![Slot::Item(1), Slot::Empty],
            },
            Bucket {
                slots: vec![Slot::Empty, Slot::Empty],
            },
        ],
        dropped: vec![],
        padded: 3,
    };
    let mut ledger = ledger();

    let receipts = submit_buckets(&mut ledger, "partial", &set).unwrap();

    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].item_count, 1);
}
