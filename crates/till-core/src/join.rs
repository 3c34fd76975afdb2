//! Keyed lookup over a secondary collection.
//!
//! A list page that decorates its primary rows with a field from another
//! collection (the products table showing per-product stock) builds a
//! [`JoinIndex`] once per secondary fetch instead of re-scanning the
//! secondary collection for every rendered row. The index is rebuilt whole
//! whenever the secondary collection is refetched, never patched.

use std::collections::HashMap;
use std::hash::Hash;

/// A one-to-one map from `key_fn(row)` to a designated payload field.
#[derive(Debug, Clone, Default)]
pub struct JoinIndex<K, V> {
    map: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> JoinIndex<K, V> {
    /// Build the index from a secondary collection. Duplicate keys keep the
    /// last row, consistent with fetch-and-replace.
    pub fn build<R>(rows: &[R], key_fn: impl Fn(&R) -> K, value_fn: impl Fn(&R) -> V) -> Self {
        let map = rows
            .iter()
            .map(|row| (key_fn(row), value_fn(row)))
            .collect();
        Self { map }
    }

    /// Look up a key, falling back to `default` when absent. Never fails.
    #[must_use]
    pub fn lookup(&self, key: &K, default: V) -> V {
        self.map.get(key).cloned().unwrap_or(default)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
