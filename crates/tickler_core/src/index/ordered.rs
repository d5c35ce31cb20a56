//! Ordered byte-key map.
//!
//! # Responsibility
//! - Point lookups, replacing inserts, deletes and sorted forward iteration
//!   over byte-sequence keys.
//!
//! # Invariants
//! - Each index instance holds exactly one concrete value type, so readers
//!   never need to check the shape of what they find.
//! - Iteration yields keys in strictly ascending lexicographic order.

use std::collections::BTreeMap;

/// Ordered map from byte-sequence keys to values of one concrete type.
///
/// A thin adapter over `BTreeMap`; any balanced ordered structure would do,
/// the property that matters is lexicographic key order, because the
/// secondary index relies on encoded-key order matching chronology.
#[derive(Debug)]
pub struct OrderedIndex<V> {
    entries: BTreeMap<Vec<u8>, V>,
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts `value` under `key`, returning the displaced value if the
    /// key was already present.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Point lookup.
    pub fn search(&self, key: &[u8]) -> Option<&V> {
        self.entries.get(key)
    }

    /// Mutable point lookup, used for in-place bucket compaction.
    pub fn search_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Removes `key`, returning its value when something was removed.
    pub fn delete(&mut self, key: &[u8]) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lazy forward iteration in ascending key order.
    ///
    /// Each call starts a fresh pass; the shared borrow keeps the index
    /// immutable for the iterator's lifetime.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> {
        self.entries.iter().map(|(key, value)| (key.as_slice(), value))
    }
}
