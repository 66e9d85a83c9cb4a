use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;

/// How the shared list length is grown when the total does not divide evenly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizingPolicy {
    /// Grow by `ceil(bucket_size / number_of_lists)`.
    ///
    /// Small padding, but divisibility is not guaranteed: `[[1], [2]]` with
    /// buckets of 5 grows to length 4, giving 8 items for one bucket of 5.
    #[default]
    Increment,
    /// Grow to the smallest length whose total is a multiple of the bucket size
    NextMultiple,
}

/// Compute the length every source list is expanded to
///
/// Returns `SizeOverflow` instead of wrapping when the arithmetic does not fit
/// in `usize`. `number_of_lists` and `bucket_size` must be non-zero.
pub fn compute_uniform_length(
    max_length: usize,
    number_of_lists: usize,
    bucket_size: usize,
    policy: SizingPolicy,
) -> Result<usize, ConfigurationError> {
    if number_of_lists == 0 {
        return Err(ConfigurationError::NoSourceLists);
    }
    if bucket_size == 0 {
        return Err(ConfigurationError::ZeroBucketSize);
    }

    let overflow = ConfigurationError::SizeOverflow {
        max_length,
        number_of_lists,
    };
    let total = max_length
        .checked_mul(number_of_lists)
        .ok_or_else(|| overflow.clone())?;

    if total % bucket_size == 0 {
        return Ok(max_length);
    }

    let new_length = match policy {
        SizingPolicy::Increment => max_length.checked_add(bucket_size.div_ceil(number_of_lists)),
        SizingPolicy::NextMultiple => {
            let step = bucket_size / gcd(bucket_size, number_of_lists);
            max_length
                .div_ceil(step)
                .checked_mul(step)
        }
    }
    .ok_or_else(|| overflow.clone())?;

    // The expanded total must be representable too
    new_length.checked_mul(number_of_lists).ok_or(overflow)?;

    Ok(new_length)
}

/// Tile `list` cyclically to exactly `new_length` elements
///
/// Element `i` of the result is `list[i % list.len()]`. A `new_length` shorter
/// than the list keeps only the prefix; this is intentional, the pipeline only
/// ever grows lists. An empty list yields an empty result.
pub fn expand_to_length<T: Clone>(list: &[T], new_length: usize) -> Vec<T> {
    if new_length == list.len() {
        return list.to_vec();
    }

    list.iter().cycle().take(new_length).cloned().collect()
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
