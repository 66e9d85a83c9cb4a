use serde::{Deserialize, Serialize};

use super::error::{AllocationError, ConfigurationError};
use super::normalizer::{SizingPolicy, compute_uniform_length};

/// Default number of items per bucket
pub const DEFAULT_BUCKET_SIZE: usize = 5;

/// What to do when the expanded lists still do not fill whole buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderPolicy {
    /// Cut the leftover tail, log it and report it in `BucketSet::dropped`
    #[default]
    Truncate,
    /// Fail with `AllocationError::SizingInvariantViolation`
    Reject,
}

/// Allocation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub bucket_size: usize,
    pub sizing: SizingPolicy,
    pub remainder: RemainderPolicy,
}

impl BucketConfig {
    pub fn new(bucket_size: usize) -> Self {
        Self {
            bucket_size,
            sizing: SizingPolicy::default(),
            remainder: RemainderPolicy::default(),
        }
    }

    pub fn sizing(mut self, sizing: SizingPolicy) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE)
    }
}

/// Sizing parameters derived from the input shape and a config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketPlan {
    pub number_of_lists: usize,
    pub max_length: usize,
    pub uniform_length: usize,
    pub bucket_size: usize,
    pub number_of_buckets: usize,
}

impl BucketPlan {
    /// Validate list lengths and derive the sizing for one run
    pub fn compute(lengths: &[usize], config: &BucketConfig) -> Result<Self, AllocationError> {
        if lengths.is_empty() {
            return Err(ConfigurationError::NoSourceLists.into());
        }
        if let Some(index) = lengths.iter().position(|&len| len == 0) {
            return Err(ConfigurationError::EmptySourceList { index }.into());
        }
        if config.bucket_size == 0 {
            return Err(ConfigurationError::ZeroBucketSize.into());
        }

        let number_of_lists = lengths.len();
        let max_length = lengths.iter().copied().max().unwrap_or(0);
        let uniform_length =
            compute_uniform_length(max_length, number_of_lists, config.bucket_size, config.sizing)?;

        // compute_uniform_length already checked this product
        let number_of_buckets = uniform_length * number_of_lists / config.bucket_size;

        let plan = Self {
            number_of_lists,
            max_length,
            uniform_length,
            bucket_size: config.bucket_size,
            number_of_buckets,
        };

        if config.remainder == RemainderPolicy::Reject && plan.remainder() != 0 {
            return Err(AllocationError::SizingInvariantViolation {
                uniform_length,
                number_of_lists,
                bucket_size: config.bucket_size,
            });
        }

        Ok(plan)
    }

    /// Length of the interleaved sequence
    pub fn flat_length(&self) -> usize {
        self.uniform_length * self.number_of_lists
    }

    /// Slots available across all buckets
    pub fn capacity(&self) -> usize {
        self.number_of_buckets * self.bucket_size
    }

    /// Items that will not fit in any bucket
    pub fn remainder(&self) -> usize {
        self.flat_length() - self.capacity()
    }
}
