use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Serialize, Deserialize};
use crate::catalog::resolver::ProductMapping;
use crate::core::error::{Error, ErrorKind, Result};
use crate::loader::layout::ListingLayout;
use crate::loader::listing::LoadPolicy;
use crate::query::category::CategoryRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listing_root: PathBuf,                  // <root>/<product>/<listing_file_name>
    pub listing_file_name: String,              // `.json` selects the JSON array format
    pub load_policy: LoadPolicy,

    pub products: ProductMapping,               // subdomain → product slug
    pub categories: CategoryRegistry,

    pub api: ApiConfig,

    pub reload_interval_ms: u64,
}

/// Limits applied by the presentation layer, never by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listing_root: PathBuf::from("./filelists"),
            listing_file_name: "files.txt".to_string(),
            load_policy: LoadPolicy::Strict,

            products: ProductMapping::default(),
            categories: CategoryRegistry::default(),

            api: ApiConfig::default(),

            reload_interval_ms: 2000,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:8080".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl Config {
    /// Load from a JSON file; absent fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io, format!("cannot read config {}: {}", path.display(), err))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn layout(&self) -> ListingLayout {
        ListingLayout::new(self.listing_root.clone(), self.listing_file_name.clone())
    }

    pub fn reload_interval(&self) -> Duration {
        Duration::from_millis(self.reload_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("assetdex.json");
        fs::write(
            &path,
            r#"{
                "listing_root": "/srv/filelists",
                "load_policy": "normalize",
                "products": {"biz": "business-headshot-ai"},
                "api": {"base_url": "https://cdn.example.com/"}
            }"#,
        )
        .unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.listing_root, PathBuf::from("/srv/filelists"));
        assert_eq!(config.load_policy, LoadPolicy::Normalize);
        assert_eq!(config.products.slugs(), vec!["business-headshot-ai"]);
        assert_eq!(config.api.base_url, "https://cdn.example.com/");
        assert_eq!(config.api.max_page_size, 100);
        assert_eq!(config.listing_file_name, "files.txt");
        assert_eq!(config.categories.len(), 8);
        assert_eq!(
            config.layout().listing_path("business-headshot-ai"),
            PathBuf::from("/srv/filelists/business-headshot-ai/files.txt")
        );
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::from_json_file(&path).unwrap_err().kind, ErrorKind::Parse);
        assert_eq!(
            Config::from_json_file(dir.path().join("none.json")).unwrap_err().kind,
            ErrorKind::Io
        );
    }
}
