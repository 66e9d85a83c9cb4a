// Public API exports
pub mod allocator;
pub mod lists;
pub mod logging;
pub mod tasks;

// Re-export main types for convenience
pub use allocator::{
    AllocationError, Bucket, BucketConfig, BucketPlan, BucketSet, ConfigurationError,
    DEFAULT_BUCKET_SIZE, RemainderPolicy, SizingPolicy, Slot, SourceList, create_buckets,
    create_buckets_with_seed,
};

pub use lists::{DEFAULT_SOURCE_RANGES, ItemId, ListSpecError, default_source_lists, parse_source_list};

pub use tasks::{CompletedTask, LedgerStats, TaskClient, TaskLedger, TaskReceipt, TaskRecord, submit_buckets};
