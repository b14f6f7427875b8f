use std::path::PathBuf;
use crate::loader::listing::{ListingFormat, ListingSource};

/// Where each product's listing lives: `<base_dir>/<product>/<file_name>`
#[derive(Debug, Clone)]
pub struct ListingLayout {
    pub base_dir: PathBuf,
    pub file_name: String,
}

impl ListingLayout {
    pub fn new(base_dir: PathBuf, file_name: impl Into<String>) -> Self {
        ListingLayout {
            base_dir,
            file_name: file_name.into(),
        }
    }

    pub fn listing_path(&self, product: &str) -> PathBuf {
        self.base_dir.join(product).join(&self.file_name)
    }

    pub fn source(&self, product: &str) -> ListingSource {
        let path = self.listing_path(product);
        let format = ListingFormat::from_path(&path);
        ListingSource::new(path, format)
    }
}
