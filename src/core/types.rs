use serde::{Serialize, Deserialize};
use std::fmt;

/// Query suffix the listing generator appends to version-stamped paths.
pub const VERSION_MARKER: &str = "?v=";

/// One line of a file listing: a relative POSIX path, possibly carrying a
/// `?v=<token>` suffix. Ordering and equality are byte-wise over the full
/// string, token included.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathEntry(String);

impl PathEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        PathEntry(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Path without the version token.
    pub fn path(&self) -> &str {
        match self.0.find(VERSION_MARKER) {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Opaque version token, if the loader stamped one.
    pub fn version(&self) -> Option<&str> {
        self.0
            .find(VERSION_MARKER)
            .map(|idx| &self.0[idx + VERSION_MARKER.len()..])
    }

    /// Lowercased extension of the file name including the dot, e.g. `.webp`.
    /// Dot-files such as `.keep` have no extension.
    pub fn extension(&self) -> Option<String> {
        let path = self.path();
        let name = path.rsplit('/').next().unwrap_or(path);
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) if idx + 1 == name.len() => None,
            Some(idx) => Some(name[idx..].to_lowercase()),
        }
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathEntry {
    fn from(raw: &str) -> Self {
        PathEntry(raw.to_string())
    }
}

impl From<String> for PathEntry {
    fn from(raw: String) -> Self {
        PathEntry(raw)
    }
}

impl PartialEq<str> for PathEntry {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PathEntry {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Paginated view over a filtered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T = PathEntry> {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn map_items<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Page of a single category; serializes as the page fields plus `category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage<T = PathEntry> {
    pub category: String,
    #[serde(flatten)]
    pub page: Page<T>,
}

impl<T> CategoryPage<T> {
    pub fn map_items<U, F>(self, f: F) -> CategoryPage<U>
    where
        F: FnMut(T) -> U,
    {
        CategoryPage {
            category: self.category,
            page: self.page.map_items(f),
        }
    }
}

/// One-level projection of the index below a base path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryView {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_token_is_split_off() {
        let entry = PathEntry::from("images/home/City/city-1.webp?v=20231217_143025");
        assert_eq!(entry.path(), "images/home/City/city-1.webp");
        assert_eq!(entry.version(), Some("20231217_143025"));
        assert_eq!(entry.extension().as_deref(), Some(".webp"));
    }

    #[test]
    fn extension_ignores_dot_files_and_directories_with_dots() {
        assert_eq!(PathEntry::from("images/.keep").extension(), None);
        assert_eq!(PathEntry::from("images/v1.2/README").extension(), None);
        assert_eq!(PathEntry::from("a/B.JPG").extension().as_deref(), Some(".jpg"));
    }

    #[test]
    fn category_page_serializes_flat() {
        let page = CategoryPage {
            category: "home".to_string(),
            page: Page {
                page: 1,
                page_size: 2,
                total: 1,
                total_pages: 1,
                items: vec![PathEntry::from("images/home/a.webp")],
            },
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["category"], "home");
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["items"][0], "images/home/a.webp");
    }
}
