use std::path::Path;
use std::sync::Arc;
use parking_lot::Mutex;
use crate::core::error::{Error, ErrorKind, Result};
use crate::loader::listing::{ListingSource, LoadPolicy};
use crate::query::category::CategoryRegistry;
use crate::query::engine::QueryEngine;
use crate::snapshot::controller::{IndexSnapshot, SnapshotController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded { version: u64, entries: usize },
    /// Listing bytes match the serving generation
    Unchanged { version: u64 },
}

/// Index of one product's listing, rebuilt on demand.
///
/// Reloads are serialized; queries go through `snapshot()` and never wait on
/// a reload in progress.
#[derive(Debug)]
pub struct ProductIndex {
    slug: String,
    source: ListingSource,
    policy: LoadPolicy,
    categories: Arc<CategoryRegistry>,
    snapshots: SnapshotController,
    reload_lock: Mutex<()>,
}

impl ProductIndex {
    /// Register a product without loading it
    pub fn new(
        slug: impl Into<String>,
        source: ListingSource,
        policy: LoadPolicy,
        categories: Arc<CategoryRegistry>,
    ) -> Self {
        ProductIndex {
            slug: slug.into(),
            source,
            policy,
            categories,
            snapshots: SnapshotController::new(),
            reload_lock: Mutex::new(()),
        }
    }

    /// Register and load; fails with a load error if the listing is unusable
    pub fn open(
        slug: impl Into<String>,
        source: ListingSource,
        policy: LoadPolicy,
        categories: Arc<CategoryRegistry>,
    ) -> Result<Self> {
        let product = Self::new(slug, source, policy, categories);
        product.reload()?;
        Ok(product)
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn listing_path(&self) -> &Path {
        &self.source.path
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshots.current().is_some()
    }

    pub fn version(&self) -> Option<u64> {
        self.snapshots.current_version()
    }

    /// Current generation; `Unavailable` until the first successful load
    pub fn snapshot(&self) -> Result<Arc<IndexSnapshot>> {
        self.snapshots.current().ok_or_else(|| {
            Error::new(
                ErrorKind::Unavailable,
                format!("file list for {} is not loaded", self.slug),
            )
        })
    }

    /// Re-read the listing and publish a new generation if its bytes changed.
    ///
    /// On failure the previous generation, if any, keeps serving.
    pub fn reload(&self) -> Result<ReloadOutcome> {
        let _guard = self.reload_lock.lock();

        let raw = self.source.read()?;
        if let Some(current) = self.snapshots.current() {
            if current.checksum == raw.checksum {
                tracing::debug!(product = %self.slug, version = current.version, "listing unchanged");
                return Ok(ReloadOutcome::Unchanged { version: current.version });
            }
        }

        let checksum = raw.checksum;
        let index = raw.into_index(self.policy)?;
        let entries = index.count();
        let engine = QueryEngine::new(index, self.categories.clone());
        let snapshot = self.snapshots.publish(engine, checksum, self.source.path.clone());

        tracing::info!(
            product = %self.slug,
            version = snapshot.version,
            entries,
            checksum,
            "published file list generation"
        );

        Ok(ReloadOutcome::Reloaded {
            version: snapshot.version,
            entries,
        })
    }
}
