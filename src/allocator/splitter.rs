use tracing::warn;

use super::types::{Bucket, Slot};

/// Buckets cut from a flat sequence, plus what the boundary did to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome<T> {
    pub buckets: Vec<Bucket<T>>,
    /// Fill slots appended because the input was short
    pub padded: usize,
    /// Trailing items cut because the input was long
    pub dropped: Vec<T>,
}

/// Reshape `flat` into `number_of_buckets` buckets of `bucket_size` slots
///
/// The sequence is first fitted to exactly `number_of_buckets * bucket_size`
/// items: short input is extended with [`Slot::Empty`], long input loses its
/// tail into `dropped`. Order is preserved within and across buckets.
pub fn split_into_buckets<T>(
    mut flat: Vec<T>,
    bucket_size: usize,
    number_of_buckets: usize,
) -> SplitOutcome<T> {
    let required = number_of_buckets.saturating_mul(bucket_size);

    let dropped = if flat.len() > required {
        let dropped = flat.split_off(required);
        warn!(
            dropped = dropped.len(),
            required, "flat sequence longer than bucket capacity, truncating"
        );
        dropped
    } else {
        Vec::new()
    };

    let padded = required - flat.len();
    let mut slots: Vec<Slot<T>> = flat.into_iter().map(Slot::Item).collect();
    slots.extend((0..padded).map(|_| Slot::Empty));

    let buckets = if bucket_size == 0 {
        (0..number_of_buckets).map(|_| Bucket::default()).collect()
    } else {
        let mut buckets = Vec::with_capacity(number_of_buckets);
        let mut rest = slots.into_iter();
        for _ in 0..number_of_buckets {
            buckets.push(Bucket {
                slots: rest.by_ref().take(bucket_size).collect(),
            });
        }
        buckets
    };

    SplitOutcome {
        buckets,
        padded,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(bucket: &Bucket<u32>) -> Vec<u32> {
        bucket.to_items()
    }

    #[test]
    fn test_exact_fit() {
        let outcome = split_into_buckets(vec![1, 2, 3, 4, 5, 6], 2, 3);

        assert_eq!(outcome.buckets.len(), 3);
        assert_eq!(items(&outcome.buckets[0]), vec![1, 2]);
        assert_eq!(items(&outcome.buckets[1]), vec![3, 4]);
        assert_eq!(items(&outcome.buckets[2]), vec![5, 6]);
        assert_eq!(outcome.padded, 0);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_long_input_truncates_tail() {
        let outcome = split_into_buckets((1..=8u32).collect(), 5, 1);

        assert_eq!(outcome.buckets.len(), 1);
        assert_eq!(items(&outcome.buckets[0]), vec![1, 2, 3, 4, 5]);
        assert_eq!(outcome.dropped, vec![6, 7, 8]);
        assert_eq!(outcome.padded, 0);
    }

    #[test]
    fn test_short_input_pads_with_empty_slots() {
        let outcome = split_into_buckets(vec![1, 2, 3], 2, 3);

        assert_eq!(outcome.padded, 3);
        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.buckets[1].slots, vec![Slot::Item(3), Slot::Empty]);
        assert_eq!(outcome.buckets[2].slots, vec![Slot::Empty, Slot::Empty]);
        for bucket in &outcome.buckets {
            assert_eq!(bucket.len(), 2);
        }
    }

    #[test]
    fn test_zero_values_are_not_padding() {
        // a real 0 must stay distinguishable from a fill slot
        let outcome = split_into_buckets(vec![0u32], 2, 1);
        assert_eq!(outcome.buckets[0].slots, vec![Slot::Item(0), Slot::Empty]);
    }

    #[test]
    fn test_zero_buckets_drops_everything() {
        let outcome = split_into_buckets(vec![1, 2, 3], 4, 0);

        assert!(outcome.buckets.is_empty());
        assert_eq!(outcome.dropped, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_bucket_size() {
        let outcome = split_into_buckets(vec![1u32, 2], 0, 2);

        assert_eq!(outcome.buckets.len(), 2);
        assert!(outcome.buckets.iter().all(|b| b.is_empty()));
        assert_eq!(outcome.dropped, vec![1, 2]);
    }
}
