use std::ops::Range;
use rayon::prelude::*;
use crate::core::error::{Error, Result};
use crate::core::types::PathEntry;

/// Path separator of listing entries
pub const SEPARATOR: char = '/';

/// Sorted, duplicate-free set of relative paths for one product.
///
/// Entries sharing a prefix form one contiguous run under byte-wise ordering,
/// so every prefix query is answered by two binary searches.
#[derive(Debug, Default)]
pub struct PathIndex {
    entries: Vec<PathEntry>,

    /// Lowercased copy of `entries`, same positions, for case-insensitive search
    folded: Vec<String>,
}

impl PathIndex {
    /// Build from loader output, rejecting anything not strictly ascending
    pub fn from_sorted(entries: Vec<PathEntry>) -> Result<Self> {
        if let Some(pos) = entries.windows(2).position(|w| w[0] >= w[1]) {
            let (prev, next) = (&entries[pos], &entries[pos + 1]);
            let reason = if prev == next { "duplicate entry" } else { "entry out of order" };
            return Err(Error::load(format!(
                "{} at position {}: {:?} after {:?}",
                reason,
                pos + 1,
                next.as_str(),
                prev.as_str()
            )));
        }

        Ok(Self::build(entries))
    }

    /// Build from arbitrary input, sorting and dropping duplicates
    pub fn from_unsorted(mut entries: Vec<PathEntry>) -> Self {
        entries.par_sort_unstable();
        entries.dedup();
        Self::build(entries)
    }

    fn build(entries: Vec<PathEntry>) -> Self {
        let folded = entries
            .par_iter()
            .map(|entry| entry.as_str().to_lowercase())
            .collect();

        PathIndex { entries, folded }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn folded(&self) -> &[String] {
        &self.folded
    }

    /// Positions of all entries starting with `prefix`
    pub fn prefix_range(&self, prefix: &str) -> Range<usize> {
        let start = self.entries.partition_point(|e| e.as_str() < prefix);

        // Within the tail every prefixed entry precedes every non-prefixed one
        let len = self.entries[start..].partition_point(|e| e.as_str().starts_with(prefix));

        start..start + len
    }

    /// Contiguous slice of entries starting with `prefix`, in index order
    pub fn prefix_slice(&self, prefix: &str) -> &[PathEntry] {
        &self.entries[self.prefix_range(prefix)]
    }
}
