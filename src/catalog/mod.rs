pub mod product;
pub mod resolver;
pub mod watcher;

use std::collections::BTreeMap;
use std::sync::Arc;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::catalog::product::{ProductIndex, ReloadOutcome};
use crate::catalog::resolver::ProductResolver;
use crate::catalog::watcher::ReloadWatcher;

/// All products served by one process, keyed by slug
#[derive(Debug)]
pub struct Catalog {
    products: BTreeMap<String, Arc<ProductIndex>>,
    resolver: ProductResolver,
}

impl Catalog {
    /// Register every configured product and attempt its first load.
    ///
    /// A product whose listing fails to load stays registered but answers
    /// `Unavailable` until a later reload succeeds.
    pub fn open(config: &Config) -> Self {
        let layout = config.layout();
        let categories = Arc::new(config.categories.clone());
        let mut products = BTreeMap::new();

        for slug in config.products.slugs() {
            let product = ProductIndex::new(
                slug,
                layout.source(slug),
                config.load_policy,
                categories.clone(),
            );

            match product.reload() {
                Ok(outcome) => tracing::info!(product = slug, ?outcome, "registered product"),
                Err(err) => tracing::error!(
                    product = slug,
                    listing = %product.listing_path().display(),
                    error = %err,
                    "initial load failed; product unavailable"
                ),
            }

            products.insert(slug.to_string(), Arc::new(product));
        }

        Catalog {
            products,
            resolver: ProductResolver::new(config.products.clone()),
        }
    }

    pub fn from_products(products: Vec<ProductIndex>, resolver: ProductResolver) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.slug().to_string(), Arc::new(p)))
            .collect();

        Catalog { products, resolver }
    }

    pub fn product(&self, slug: &str) -> Result<&Arc<ProductIndex>> {
        self.products
            .get(slug)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("unknown product: {}", slug)))
    }

    pub fn products(&self) -> impl Iterator<Item = &Arc<ProductIndex>> {
        self.products.values()
    }

    pub fn resolver(&self) -> &ProductResolver {
        &self.resolver
    }

    pub fn reload_all(&self) -> Vec<(String, Result<ReloadOutcome>)> {
        self.products
            .iter()
            .map(|(slug, product)| (slug.clone(), product.reload()))
            .collect()
    }

    /// One reload watcher per product; must run inside a tokio runtime
    pub fn watch(&self, config: &Config) -> Vec<ReloadWatcher> {
        self.products
            .values()
            .map(|product| ReloadWatcher::spawn(product.clone(), config.reload_interval()))
            .collect()
    }
}
