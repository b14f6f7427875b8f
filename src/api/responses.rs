use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind};
use crate::core::types::{CategoryPage, Page};

/// A listed file with its externally addressable URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub path: String,
    pub url: String,
}

pub type FilesResponse = Page<FileItem>;

pub type CategoryFilesResponse = CategoryPage<FileItem>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub product: String,
    pub total_files: usize,
    pub version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: String,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub total: usize,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub case_sensitive: bool,
    pub total: usize,
    pub items: Vec<FileItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    /// `/` for the root
    pub path: String,
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub total_directories: usize,
    pub total_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// HTTP-style status code a transport layer should answer with
    pub fn status_code(kind: ErrorKind) -> u16 {
        match kind {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Unavailable => 503,
            ErrorKind::Load | ErrorKind::Io | ErrorKind::Parse => 500,
        }
    }

    pub fn from_error(err: &Error) -> (u16, Self) {
        (
            Self::status_code(err.kind),
            ErrorResponse { error: err.context.clone() },
        )
    }
}
