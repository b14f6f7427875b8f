use std::sync::Arc;
use crate::api::listing::render_directory_listing;
use crate::api::responses::{
    CategoriesResponse, CategoryFilesResponse, CategorySummary, DirectoryResponse, FileItem,
    FilesResponse, HealthResponse, SearchResponse,
};
use crate::catalog::Catalog;
use crate::core::config::ApiConfig;
use crate::core::error::{Error, Result};
use crate::core::stats::{HealthStatus, IndexStats};
use crate::core::types::PathEntry;
use crate::snapshot::controller::IndexSnapshot;

/// Request-facing layer over the catalog: validates input, caps page sizes
/// and turns entries into URLs. Transport-agnostic.
#[derive(Debug, Clone)]
pub struct FileListService {
    catalog: Arc<Catalog>,
    config: ApiConfig,
}

impl FileListService {
    pub fn new(catalog: Arc<Catalog>, config: ApiConfig) -> Self {
        FileListService { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn health(&self, product: &str) -> Result<HealthResponse> {
        let index = self.catalog.product(product)?;

        let (status, total_files) = match index.snapshot() {
            Ok(snapshot) => (HealthStatus::Healthy, snapshot.engine.count()),
            Err(err) => (HealthStatus::Unhealthy(err.context), 0),
        };

        Ok(HealthResponse {
            status: status.label().to_string(),
            product: product.to_string(),
            total_files,
            version: index.version(),
            detail: status.reason().map(str::to_string),
        })
    }

    pub fn files(&self, product: &str, page: Option<i64>, page_size: Option<usize>) -> Result<FilesResponse> {
        let snapshot = self.snapshot(product)?;
        let page = snapshot
            .engine
            .page(page.unwrap_or(1), self.page_size(page_size));

        Ok(page.map_items(|entry| self.file_item(product, entry)))
    }

    /// Registered categories that currently hold at least one file
    pub fn categories(&self, product: &str) -> Result<CategoriesResponse> {
        let snapshot = self.snapshot(product)?;
        let engine = &snapshot.engine;

        let categories: Vec<CategorySummary> = engine
            .categories()
            .iter()
            .filter_map(|(key, category)| {
                let count = engine.files_by_category(key).len();
                (count > 0).then(|| CategorySummary {
                    key: key.to_string(),
                    name: if category.label.is_empty() { key.to_string() } else { category.label.clone() },
                    count,
                })
            })
            .collect();

        Ok(CategoriesResponse {
            total: categories.len(),
            categories,
        })
    }

    pub fn category_files(
        &self,
        product: &str,
        category: &str,
        page: Option<i64>,
        page_size: Option<usize>,
    ) -> Result<CategoryFilesResponse> {
        let snapshot = self.snapshot(product)?;
        let page = snapshot
            .engine
            .paginated_category(category, page.unwrap_or(1), self.page_size(page_size));

        Ok(page.map_items(|entry| self.file_item(product, entry)))
    }

    /// Rejects an empty or whitespace-only keyword
    pub fn search(&self, product: &str, keyword: &str, case_sensitive: bool) -> Result<SearchResponse> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::invalid_argument("missing keyword"));
        }

        let snapshot = self.snapshot(product)?;
        let items: Vec<FileItem> = snapshot
            .engine
            .search(keyword, case_sensitive)
            .into_iter()
            .map(|entry| self.file_item(product, entry))
            .collect();

        Ok(SearchResponse {
            keyword: keyword.to_string(),
            case_sensitive,
            total: items.len(),
            items,
        })
    }

    pub fn directory(&self, product: &str, path: &str) -> Result<DirectoryResponse> {
        let path = path.trim();
        let snapshot = self.snapshot(product)?;
        let view = snapshot.engine.directory_structure(path);

        Ok(DirectoryResponse {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            total_directories: view.directories.len(),
            total_files: view.files.len(),
            directories: view.directories,
            files: view.files,
        })
    }

    /// HTML page for one directory level of a product
    pub fn directory_page(&self, product: &str, path: &str) -> Result<String> {
        let snapshot = self.snapshot(product)?;
        let path = path.trim_matches('/');
        let view = snapshot.engine.directory_structure(path);

        let url_path = if path.is_empty() {
            format!("/{}/", product)
        } else {
            format!("/{}/{}/", product, path)
        };
        Ok(render_directory_listing(&url_path, &view))
    }

    pub fn stats(&self, product: &str) -> Result<IndexStats> {
        let snapshot = self.snapshot(product)?;
        Ok(IndexStats::collect(product, &snapshot))
    }

    /// `<base_url>/<product>/<path>`
    pub fn url_for(&self, product: &str, entry: &PathEntry) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            product,
            entry.as_str()
        )
    }

    fn snapshot(&self, product: &str) -> Result<Arc<IndexSnapshot>> {
        self.catalog.product(product)?.snapshot()
    }

    fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size.max(1))
    }

    fn file_item(&self, product: &str, entry: PathEntry) -> FileItem {
        FileItem {
            url: self.url_for(product, &entry),
            path: entry.into_string(),
        }
    }
}
