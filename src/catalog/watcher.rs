use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use crate::catalog::product::{ProductIndex, ReloadOutcome};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background task that polls a product's listing and publishes a new
/// generation whenever its contents change. Aborted on drop.
#[derive(Debug)]
pub struct ReloadWatcher {
    handle: JoinHandle<()>,
}

impl ReloadWatcher {
    /// Must be called from within a tokio runtime. Intervals below 1 ms are
    /// raised to 1 ms.
    pub fn spawn(product: Arc<ProductIndex>, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick fires immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let target = product.clone();
                match tokio::task::spawn_blocking(move || target.reload()).await {
                    Ok(Ok(ReloadOutcome::Reloaded { .. })) | Ok(Ok(ReloadOutcome::Unchanged { .. })) => {}
                    Ok(Err(err)) => {
                        tracing::warn!(
                            product = %product.slug(),
                            error = %err,
                            serving = ?product.version(),
                            "reload failed; previous generation keeps serving"
                        );
                    }
                    Err(err) => {
                        tracing::warn!(product = %product.slug(), error = %err, "reload task panicked");
                    }
                }
            }
        });

        ReloadWatcher { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ReloadWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::listing::{ListingFormat, ListingSource, LoadPolicy};
    use crate::query::category::CategoryRegistry;
    use std::fs;
    use tempfile::TempDir;

    // Rename into place so the poller never sees a half-written listing
    fn replace(path: &std::path::Path, contents: &str) {
        let staged = path.with_extension("tmp");
        fs::write(&staged, contents).unwrap();
        fs::rename(&staged, path).unwrap();
    }

    async fn wait_for_version(product: &ProductIndex, version: u64) -> bool {
        for _ in 0..200 {
            if product.version() == Some(version) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn publishes_new_generation_when_listing_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.txt");
        fs::write(&path, "images/home/a.webp\n").unwrap();

        let source = ListingSource::new(path.clone(), ListingFormat::Text);
        let product = Arc::new(
            ProductIndex::open("headshot-ai", source, LoadPolicy::Strict, Arc::new(CategoryRegistry::default()))
                .unwrap(),
        );

        let watcher = ReloadWatcher::spawn(product.clone(), Duration::from_millis(10));
        assert!(watcher.is_running());

        replace(&path, "images/home/a.webp\nimages/home/b.webp\n");
        assert!(wait_for_version(&product, 2).await);
        assert_eq!(product.snapshot().unwrap().engine.count(), 2);

        // A broken listing leaves generation 2 in place
        replace(&path, "images/z.webp\nimages/a.webp\n");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(product.version(), Some(2));

        watcher.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn zero_interval_still_polls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.txt");
        fs::write(&path, "images/home/a.webp\n").unwrap();

        let source = ListingSource::new(path.clone(), ListingFormat::Text);
        let product = Arc::new(
            ProductIndex::open("headshot-ai", source, LoadPolicy::Strict, Arc::new(CategoryRegistry::default()))
                .unwrap(),
        );

        let watcher = ReloadWatcher::spawn(product.clone(), Duration::ZERO);
        replace(&path, "images/home/a.webp\nimages/home/b.webp\n");
        assert!(wait_for_version(&product, 2).await);
        assert!(watcher.is_running());
    }
}
