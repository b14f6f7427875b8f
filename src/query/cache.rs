use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;
use serde::{Serialize, Deserialize};
use crate::core::types::PathEntry;

/// Shared, immutable result of a prefix query
pub type PrefixMatches = Arc<[PathEntry]>;

/// Memoization of prefix queries for a single index generation.
///
/// Not an LRU: the key space is bounded by the categories and directories
/// callers ask for. Dropped together with its generation.
#[derive(Debug, Default)]
pub struct PrefixCache {
    entries: RwLock<HashMap<String, PrefixMatches>>,
    hit_count: AtomicUsize,
    miss_count: AtomicUsize,
}

impl PrefixCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, prefix: &str) -> Option<PrefixMatches> {
        let entries = self.entries.read();
        if let Some(matches) = entries.get(prefix) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(matches.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    /// Return the cached matches for `prefix`, computing them on first use.
    ///
    /// Two racing misses compute twice but both callers get the value that
    /// won the insert.
    pub fn get_or_compute<F>(&self, prefix: &str, compute: F) -> PrefixMatches
    where
        F: FnOnce() -> PrefixMatches,
    {
        // Fast path: shared lock only
        if let Some(matches) = self.get(prefix) {
            return matches;
        }

        let computed = compute();
        tracing::debug!(prefix, matches = computed.len(), "prefix cache miss");

        let mut entries = self.entries.write();
        entries
            .entry(prefix.to_string())
            .or_insert(computed)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}
