use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// Subdomain → product slug table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductMapping {
    subdomains: BTreeMap<String, String>,
}

impl ProductMapping {
    pub fn empty() -> Self {
        ProductMapping { subdomains: BTreeMap::new() }
    }

    pub fn with(mut self, subdomain: &str, slug: &str) -> Self {
        self.subdomains.insert(subdomain.to_string(), slug.to_string());
        self
    }

    pub fn slug_for_subdomain(&self, subdomain: &str) -> Option<&str> {
        self.subdomains.get(subdomain).map(String::as_str)
    }

    pub fn is_slug(&self, slug: &str) -> bool {
        self.subdomains.values().any(|s| s == slug)
    }

    /// Distinct product slugs, sorted
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.subdomains.values().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs.dedup();
        slugs
    }
}

impl Default for ProductMapping {
    fn default() -> Self {
        ProductMapping::empty()
            .with("headshot", "headshot-ai")
            .with("groupphoto", "group-photo-ai")
            .with("fashionshot", "fashion-shot-ai")
    }
}

/// Request path resolved against the product tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub product: Option<String>,
    /// Path relative to the product root, without a leading separator
    pub path: String,
}

impl ResolvedPath {
    /// Path relative to the store root
    pub fn store_path(&self) -> String {
        match &self.product {
            Some(product) if self.path.is_empty() => product.clone(),
            Some(product) => format!("{}/{}", product, self.path),
            None => self.path.clone(),
        }
    }
}

/// Identifies the product a request targets, by Host subdomain first and by
/// leading path segment second
#[derive(Debug, Clone, Default)]
pub struct ProductResolver {
    mapping: ProductMapping,
}

impl ProductResolver {
    pub fn new(mapping: ProductMapping) -> Self {
        ProductResolver { mapping }
    }

    pub fn mapping(&self) -> &ProductMapping {
        &self.mapping
    }

    /// `headshot.localhost:8080` → `headshot-ai`
    pub fn from_host(&self, host: &str) -> Option<&str> {
        let hostname = host.split(':').next().unwrap_or(host);
        let mut labels = hostname.split('.');
        let subdomain = labels.next()?;
        labels.next()?;
        self.mapping.slug_for_subdomain(subdomain)
    }

    /// `/headshot-ai/images/...` → `headshot-ai`
    pub fn from_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        let first = path.trim_matches('/').split('/').next()?;
        self.mapping.is_slug(first).then_some(first)
    }

    pub fn resolve(&self, host: Option<&str>, path: &str) -> ResolvedPath {
        let product = host
            .and_then(|h| self.from_host(h))
            .or_else(|| self.from_path(path))
            .map(str::to_string);

        let path = match &product {
            Some(slug) => strip_product(path, slug),
            None => path.trim_start_matches('/').to_string(),
        };

        ResolvedPath { product, path }
    }
}

/// Drop a leading `slug` segment from `path` if present
pub fn strip_product(path: &str, slug: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    match trimmed.split_once('/') {
        Some((first, rest)) if first == slug => rest.trim_start_matches('/').to_string(),
        None if trimmed == slug => String::new(),
        _ => trimmed.to_string(),
    }
}
