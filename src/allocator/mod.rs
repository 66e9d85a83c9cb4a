mod error;
mod interleaver;
mod normalizer;
mod plan;
mod shuffler;
mod splitter;
mod types;


pub use error::{AllocationError, ConfigurationError};
pub use interleaver::interleave_columns;
pub use normalizer::{SizingPolicy, compute_uniform_length, expand_to_length};
pub use plan::{BucketConfig, BucketPlan, DEFAULT_BUCKET_SIZE, RemainderPolicy};
pub use shuffler::shuffle_lists;
pub use splitter::{SplitOutcome, split_into_buckets};
pub use types::{Bucket, BucketSet, Slot, SourceList};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Allocate items from `lists` into fixed-size buckets
///
/// Pipeline:
/// - Validate input and derive a [`BucketPlan`]
/// - Shuffle every list independently with `rng`
/// - Expand each list cyclically to the plan's uniform length
/// - Interleave column by column so neighbouring items come from different lists
/// - Cut the flat sequence into `number_of_buckets` buckets
///
/// Fails fast on empty input or a zero bucket size, and on a leftover
/// remainder when the config asks for [`RemainderPolicy::Reject`].
pub fn create_buckets<T: Clone, R: Rng + ?Sized>(
    lists: &[SourceList<T>],
    config: &BucketConfig,
    rng: &mut R,
) -> Result<BucketSet<T>, AllocationError> {
    let lengths: Vec<usize> = lists.iter().map(Vec::len).collect();
    let plan = BucketPlan::compute(&lengths, config)?;
    debug!(?plan, "computed bucket plan");

    let shuffled = shuffle_lists(lists, rng);

    let normalized: Vec<Vec<T>> = shuffled
        .iter()
        .map(|list| expand_to_length(list, plan.uniform_length))
        .collect();
    debug!(
        uniform_length = plan.uniform_length,
        lists = normalized.len(),
        "normalized list lengths"
    );

    let flat = interleave_columns(&normalized);
    debug!(len = flat.len(), "interleaved lists");

    let SplitOutcome {
        buckets,
        padded,
        dropped,
    } = split_into_buckets(flat, plan.bucket_size, plan.number_of_buckets);
    debug!(
        buckets = buckets.len(),
        padded,
        dropped = dropped.len(),
        "split into buckets"
    );

    Ok(BucketSet {
        plan,
        buckets,
        dropped,
        padded,
    })
}

/// [`create_buckets`] with a `ChaCha8Rng` seeded from `seed`
pub fn create_buckets_with_seed<T: Clone>(
    lists: &[SourceList<T>],
    config: &BucketConfig,
    seed: u64,
) -> Result<BucketSet<T>, AllocationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    create_buckets(lists, config, &mut rng)
}
