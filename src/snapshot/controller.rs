use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use crate::query::engine::QueryEngine;

/// One immutable index generation together with its prefix cache
#[derive(Debug)]
pub struct IndexSnapshot {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    /// CRC32 of the listing bytes this generation was built from
    pub checksum: u32,
    pub source: PathBuf,
    pub engine: QueryEngine,
}

/// Publishes generations by swapping a single `Arc`.
///
/// Readers clone the current `Arc` and keep using it for the whole query, so
/// they see either the old generation or the new one, never a mix.
#[derive(Debug)]
pub struct SnapshotController {
    current: RwLock<Option<Arc<IndexSnapshot>>>,
    next_version: AtomicU64,
}

impl SnapshotController {
    pub fn new() -> Self {
        SnapshotController {
            current: RwLock::new(None),
            next_version: AtomicU64::new(1),
        }
    }

    pub fn publish(&self, engine: QueryEngine, checksum: u32, source: PathBuf) -> Arc<IndexSnapshot> {
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);

        let snapshot = Arc::new(IndexSnapshot {
            version,
            loaded_at: Utc::now(),
            checksum,
            source,
            engine,
        });

        *self.current.write() = Some(snapshot.clone());
        snapshot
    }

    pub fn current(&self) -> Option<Arc<IndexSnapshot>> {
        self.current.read().clone()
    }

    pub fn current_version(&self) -> Option<u64> {
        self.current.read().as_ref().map(|s| s.version)
    }

    pub fn current_checksum(&self) -> Option<u32> {
        self.current.read().as_ref().map(|s| s.checksum)
    }
}

impl Default for SnapshotController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PathEntry;
    use crate::index::path_index::PathIndex;
    use crate::query::category::CategoryRegistry;

    fn engine(paths: &[&str]) -> QueryEngine {
        let index = PathIndex::from_unsorted(paths.iter().map(|p| PathEntry::from(*p)).collect());
        QueryEngine::new(index, Arc::new(CategoryRegistry::default()))
    }

    #[test]
    fn starts_empty() {
        let controller = SnapshotController::new();
        assert!(controller.current().is_none());
        assert_eq!(controller.current_version(), None);
    }

    #[test]
    fn readers_keep_their_generation_across_swaps() {
        let controller = SnapshotController::new();
        controller.publish(engine(&["images/home/a.webp"]), 1, PathBuf::from("files.txt"));

        let held = controller.current().unwrap();
        held.engine.filter_by_prefix("images/");
        assert_eq!(held.engine.cache_stats().size, 1);

        let next = controller.publish(
            engine(&["images/home/a.webp", "images/home/b.webp"]),
            2,
            PathBuf::from("files.txt"),
        );

        assert_eq!(held.version, 1);
        assert_eq!(held.engine.count(), 1);
        assert_eq!(next.version, 2);
        assert_eq!(controller.current_version(), Some(2));
        assert_eq!(controller.current_checksum(), Some(2));

        // A new generation starts with a fresh cache
        assert_eq!(controller.current().unwrap().engine.cache_stats().size, 0);
    }
}
