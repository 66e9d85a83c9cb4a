use serde::{Deserialize, Serialize};

use super::plan::BucketPlan;

/// An ordered list of item identifiers supplied by the caller
pub type SourceList<T> = Vec<T>;

/// One position inside a bucket
///
/// Padding is always `Empty`, never a default-valued item, so downstream
/// consumers cannot confuse a fill slot with a real identifier. Serializes as
/// the bare item, or `null` for `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot<T> {
    Item(T),
    Empty,
}

impl<T> Slot<T> {
    pub fn item(&self) -> Option<&T> {
        match self {
            Slot::Item(item) => Some(item),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// A fixed-size unit of work handed to one worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket<T> {
    pub slots: Vec<Slot<T>>,
}

impl<T> Bucket<T> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Real items in slot order, skipping fill slots
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Slot::item)
    }

    /// Number of fill slots in this bucket
    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }
}

impl<T: Clone> Bucket<T> {
    pub fn to_items(&self) -> Vec<T> {
        self.items().cloned().collect()
    }
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

/// Result of one allocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSet<T> {
    /// Sizing parameters the buckets were built from
    pub plan: BucketPlan,
    /// Buckets in allocation order
    pub buckets: Vec<Bucket<T>>,
    /// Items cut off the end of the interleaved sequence
    pub dropped: Vec<T>,
    /// Number of `Slot::Empty` fill slots across all buckets
    pub padded: usize,
}

impl<T> BucketSet<T> {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bucket<T>> {
        self.buckets.iter()
    }

    pub fn was_truncated(&self) -> bool {
        !self.dropped.is_empty()
    }

    /// Total real items across all buckets
    pub fn item_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len() - b.empty_count()).sum()
    }
}

impl<'a, T> IntoIterator for &'a BucketSet<T> {
    type Item = &'a Bucket<T>;
    type IntoIter = std::slice::Iter<'a, Bucket<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}
