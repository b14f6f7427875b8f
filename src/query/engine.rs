use std::collections::BTreeSet;
use std::sync::Arc;
use rayon::prelude::*;
use crate::core::types::{CategoryPage, DirectoryView, Page, PathEntry};
use crate::index::path_index::{PathIndex, SEPARATOR};
use crate::query::cache::{CacheStats, PrefixCache, PrefixMatches};
use crate::query::category::CategoryRegistry;
use crate::query::pagination::paginate;

/// Read-only queries over one index generation.
///
/// Every operation is infallible once the index is loaded: pages clamp,
/// unknown categories fall back to a derived prefix and an empty keyword
/// matches nothing. The prefix cache lives and dies with the engine.
#[derive(Debug)]
pub struct QueryEngine {
    index: PathIndex,
    cache: PrefixCache,
    categories: Arc<CategoryRegistry>,
}

impl QueryEngine {
    pub fn new(index: PathIndex, categories: Arc<CategoryRegistry>) -> Self {
        QueryEngine {
            index,
            cache: PrefixCache::new(),
            categories,
        }
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn count(&self) -> usize {
        self.index.count()
    }

    pub fn all_files(&self) -> &[PathEntry] {
        self.index.entries()
    }

    pub fn page(&self, page: i64, page_size: usize) -> Page {
        paginate(self.index.entries(), page, page_size)
    }

    /// All entries starting with `prefix`, memoized by the exact prefix string
    pub fn filter_by_prefix(&self, prefix: &str) -> PrefixMatches {
        self.cache
            .get_or_compute(prefix, || Arc::from(self.index.prefix_slice(prefix)))
    }

    /// Direct children of `dir`, excluding deeper descendants.
    ///
    /// `dir` always gets a trailing separator, so `""` becomes `"/"` and
    /// matches nothing; use `directory_structure("")` for the root.
    pub fn filter_by_directory(&self, dir: &str) -> Vec<PathEntry> {
        let dir = with_separator(dir);

        self.index
            .prefix_slice(&dir)
            .iter()
            .filter(|entry| !entry.as_str()[dir.len()..].contains(SEPARATOR))
            .cloned()
            .collect()
    }

    /// One-level view below `base`; an empty base is the root
    pub fn directory_structure(&self, base: &str) -> DirectoryView {
        let base = if base.is_empty() { String::new() } else { with_separator(base) };
        let mut directories = BTreeSet::new();
        let mut files = BTreeSet::new();

        for entry in self.index.prefix_slice(&base) {
            let residual = &entry.as_str()[base.len()..];
            match residual.split_once(SEPARATOR) {
                Some((dir, _)) => {
                    directories.insert(dir);
                }
                None => {
                    files.insert(residual);
                }
            }
        }

        DirectoryView {
            directories: directories.into_iter().map(str::to_string).collect(),
            files: files.into_iter().map(str::to_string).collect(),
        }
    }

    /// Substring search in index order. The version token is part of the
    /// searched text.
    pub fn search(&self, keyword: &str, case_sensitive: bool) -> Vec<PathEntry> {
        if keyword.is_empty() {
            return Vec::new();
        }

        let entries = self.index.entries();
        if case_sensitive {
            return entries
                .par_iter()
                .filter(|entry| entry.as_str().contains(keyword))
                .cloned()
                .collect();
        }

        let needle = keyword.to_lowercase();
        self.index
            .folded()
            .par_iter()
            .zip(entries.par_iter())
            .filter(|(folded, _)| folded.contains(needle.as_str()))
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    pub fn files_by_category(&self, key: &str) -> PrefixMatches {
        let prefix = self.categories.resolve(key);
        self.filter_by_prefix(&prefix)
    }

    pub fn paginated_category(&self, key: &str, page: i64, page_size: usize) -> CategoryPage {
        let files = self.files_by_category(key);

        CategoryPage {
            category: key.to_string(),
            page: paginate(&files, page, page_size),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn with_separator(dir: &str) -> String {
    let mut dir = dir.to_string();
    if !dir.ends_with(SEPARATOR) {
        dir.push(SEPARATOR);
    }
    dir
}
