use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffle every list independently, leaving the caller's lists untouched
pub fn shuffle_lists<T: Clone, R: Rng + ?Sized>(lists: &[Vec<T>], rng: &mut R) -> Vec<Vec<T>> {
    lists
        .iter()
        .map(|list| {
            let mut copy = list.clone();
            copy.shuffle(rng);
            copy
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_preserves_multiset_per_list() {
        let lists = vec![(0..50).collect::<Vec<u32>>(), vec![7, 7, 7, 1], vec![9]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let shuffled = shuffle_lists(&lists, &mut rng);

        assert_eq!(shuffled.len(), lists.len());
        for (original, out) in lists.iter().zip(&shuffled) {
            assert_eq!(sorted(original.clone()), sorted(out.clone()));
        }
    }

    #[test]
    fn test_does_not_mutate_input() {
        let lists = vec![(0..20).collect::<Vec<u32>>()];
        let before = lists.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let _ = shuffle_lists(&lists, &mut rng);

        assert_eq!(lists, before);
    }

    #[test]
    fn test_same_seed_same_order() {
        let lists = vec![(0..100).collect::<Vec<u32>>(), (100..140).collect()];

        let a = shuffle_lists(&lists, &mut ChaCha8Rng::seed_from_u64(1234));
        let b = shuffle_lists(&lists, &mut ChaCha8Rng::seed_from_u64(1234));

        assert_eq!(a, b);
    }

    #[test]
    fn test_actually_reorders() {
        let lists = vec![(0..100).collect::<Vec<u32>>()];
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let shuffled = shuffle_lists(&lists, &mut rng);

        // 100! orderings; identity would mean the rng is not being consumed
        assert_ne!(shuffled[0], lists[0]);
    }
}
