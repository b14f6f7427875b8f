use std::collections::BTreeMap;
use std::path::PathBuf;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use crate::query::cache::CacheStats;
use crate::snapshot::controller::IndexSnapshot;

/// Per-product index statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub product: String,
    pub source: PathBuf,
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub total_files: usize,

    // File count per registered category, in registry order
    pub categories: Vec<CategoryCount>,
    // File count per lowercased extension, `""` for none
    pub formats: BTreeMap<String, usize>,

    pub cache_stats: CacheStats,
}

impl IndexStats {
    pub fn collect(product: &str, snapshot: &IndexSnapshot) -> Self {
        let engine = &snapshot.engine;

        let categories = engine
            .categories()
            .iter()
            .map(|(key, _)| CategoryCount {
                category: key.to_string(),
                count: engine.files_by_category(key).len(),
            })
            .collect();

        let mut formats = BTreeMap::new();
        for entry in engine.all_files() {
            *formats.entry(entry.extension().unwrap_or_default()).or_insert(0) += 1;
        }

        IndexStats {
            product: product.to_string(),
            source: snapshot.source.clone(),
            version: snapshot.version,
            loaded_at: snapshot.loaded_at,
            total_files: engine.count(),
            categories,
            formats,
            cache_stats: engine.cache_stats(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl IndexStats {
    pub fn category_count(&self, key: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.category == key)
            .map(|c| c.count)
    }
}

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "ok",
            HealthStatus::Unhealthy(_) => "unavailable",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            HealthStatus::Healthy => None,
            HealthStatus::Unhealthy(reason) => Some(reason),
        }
    }
}
