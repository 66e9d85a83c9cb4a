use thiserror::Error;

/// Caller contract violations detected before any allocation work is done
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No source lists supplied")]
    NoSourceLists,

    #[error("Source list {index} is empty")]
    EmptySourceList { index: usize },

    #[error("Bucket size must be positive")]
    ZeroBucketSize,

    #[error("Sizing overflow: {max_length} items x {number_of_lists} lists")]
    SizeOverflow {
        max_length: usize,
        number_of_lists: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(
        "Sizing invariant violated: {uniform_length} x {number_of_lists} items do not divide into buckets of {bucket_size}"
    )]
    SizingInvariantViolation {
        uniform_length: usize,
        number_of_lists: usize,
        bucket_size: usize,
    },
}

impl AllocationError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, AllocationError::Configuration(_))
    }
}
