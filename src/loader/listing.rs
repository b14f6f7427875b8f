use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};
use crate::core::types::PathEntry;
use crate::index::path_index::PathIndex;

/// How strictly the loader's ordering is trusted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Unsorted or duplicated input is a load error
    #[default]
    Strict,
    /// Sort and deduplicate, logging a warning
    Normalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// One path per line
    Text,
    /// JSON array of path strings
    Json,
}

impl ListingFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ListingFormat::Json,
            _ => ListingFormat::Text,
        }
    }
}

/// A listing file on disk
#[derive(Debug, Clone)]
pub struct ListingSource {
    pub path: PathBuf,
    pub format: ListingFormat,
}

/// Listing bytes plus their CRC32 fingerprint
#[derive(Debug)]
pub struct RawListing {
    pub data: Vec<u8>,
    pub checksum: u32,
    pub format: ListingFormat,
}

impl ListingSource {
    pub fn new(path: PathBuf, format: ListingFormat) -> Self {
        ListingSource { path, format }
    }

    pub fn read(&self) -> Result<RawListing> {
        let data = fs::read(&self.path).map_err(|err| match err.kind() {
            IoErrorKind::NotFound => {
                Error::load(format!("listing not found: {}", self.path.display()))
            }
            _ => Error::load(format!("cannot read listing {}: {}", self.path.display(), err)),
        })?;
        let checksum = crc32fast::hash(&data);

        Ok(RawListing {
            data,
            checksum,
            format: self.format,
        })
    }

    /// Read, parse and index in one step
    pub fn load(&self, policy: LoadPolicy) -> Result<(PathIndex, u32)> {
        let raw = self.read()?;
        let checksum = raw.checksum;
        Ok((raw.into_index(policy)?, checksum))
    }
}

impl RawListing {
    pub fn entries(&self) -> Result<Vec<PathEntry>> {
        parse_listing(&self.data, self.format)
    }

    pub fn into_index(self, policy: LoadPolicy) -> Result<PathIndex> {
        build_index(self.entries()?, policy)
    }
}

/// Split listing bytes into entries. Blank lines and surrounding whitespace
/// are ignored; the order is kept as found.
pub fn parse_listing(data: &[u8], format: ListingFormat) -> Result<Vec<PathEntry>> {
    match format {
        ListingFormat::Text => {
            let text = std::str::from_utf8(data).map_err(|err| {
                Error::load(format!("listing is not valid UTF-8 at byte {}", err.valid_up_to()))
            })?;
            let text = text.strip_prefix('\u{feff}').unwrap_or(text);

            Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathEntry::from)
                .collect())
        }
        ListingFormat::Json => {
            let paths: Vec<String> = serde_json::from_slice(data)
                .map_err(|err| Error::load(format!("malformed JSON listing: {}", err)))?;

            Ok(paths
                .iter()
                .map(|path| path.trim())
                .filter(|path| !path.is_empty())
                .map(PathEntry::from)
                .collect())
        }
    }
}

pub fn build_index(entries: Vec<PathEntry>, policy: LoadPolicy) -> Result<PathIndex> {
    match policy {
        LoadPolicy::Strict => PathIndex::from_sorted(entries),
        LoadPolicy::Normalize => {
            let in_order = entries.windows(2).all(|w| w[0] < w[1]);
            if in_order {
                return PathIndex::from_sorted(entries);
            }

            let received = entries.len();
            let index = PathIndex::from_unsorted(entries);
            tracing::warn!(
                received,
                kept = index.count(),
                "listing was not strictly sorted; normalized on load"
            );
            Ok(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_listing(dir: &TempDir, name: &str, contents: &[u8]) -> ListingSource {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        let format = ListingFormat::from_path(&path);
        ListingSource::new(path, format)
    }

    #[test]
    fn text_listing_skips_blank_lines_and_whitespace() {
        let entries = parse_listing(
            b"\xef\xbb\xbfimages/a.webp?v=1\r\n\n   \nimages/b.webp  \n",
            ListingFormat::Text,
        )
        .unwrap();

        assert_eq!(entries, vec![PathEntry::from("images/a.webp?v=1"), PathEntry::from("images/b.webp")]);
    }

    #[test]
    fn invalid_utf8_is_a_load_error() {
        let err = parse_listing(b"images/\xff.webp\n", ListingFormat::Text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Load);
        assert!(err.context.contains("byte 7"));
    }

    #[test]
    fn json_listing_is_accepted() {
        let entries =
            parse_listing(br#"["images/a.webp", "", "images/b.webp"]"#, ListingFormat::Json).unwrap();
        assert_eq!(entries.len(), 2);

        let err = parse_listing(b"{\"not\": \"an array\"}", ListingFormat::Json).unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn json_entries_are_trimmed_like_text_lines() {
        let json = parse_listing(br#"[" images/a.webp?v=1 ", "   ", "images/b.webp\n"]"#, ListingFormat::Json)
            .unwrap();
        let text = parse_listing(b" images/a.webp?v=1 \n   \nimages/b.webp\n", ListingFormat::Text).unwrap();

        assert_eq!(json, vec![PathEntry::from("images/a.webp?v=1"), PathEntry::from("images/b.webp")]);
        assert_eq!(json, text);
    }

    #[test]
    fn missing_listing_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let source = ListingSource::new(dir.path().join("absent/files.txt"), ListingFormat::Text);

        let err = source.load(LoadPolicy::Strict).unwrap_err();
        assert!(err.is_load());
        assert!(err.context.contains("listing not found"));
    }

    #[test]
    fn strict_policy_rejects_unsorted_listing() {
        let dir = TempDir::new().unwrap();
        let source = write_listing(&dir, "files.txt", b"images/b.webp\nimages/a.webp\n");

        assert!(source.load(LoadPolicy::Strict).unwrap_err().is_load());

        let (index, _) = source.load(LoadPolicy::Normalize).unwrap();
        assert_eq!(index.entries()[0], "images/a.webp");
    }

    #[test]
    fn normalize_policy_drops_duplicates() {
        let index = build_index(
            vec!["a".into(), "c".into(), "a".into(), "b".into()],
            LoadPolicy::Normalize,
        )
        .unwrap();
        assert_eq!(index.count(), 3);
    }

    #[test]
    fn checksum_tracks_contents() {
        let dir = TempDir::new().unwrap();
        let first = write_listing(&dir, "one.txt", b"images/a.webp\n").read().unwrap();
        let same = write_listing(&dir, "two.txt", b"images/a.webp\n").read().unwrap();
        let other = write_listing(&dir, "three.txt", b"images/b.webp\n").read().unwrap();

        assert_eq!(first.checksum, same.checksum);
        assert_ne!(first.checksum, other.checksum);
    }

    #[test]
    fn empty_listing_yields_empty_index() {
        let dir = TempDir::new().unwrap();
        let (index, _) = write_listing(&dir, "files.txt", b"").load(LoadPolicy::Strict).unwrap();
        assert!(index.is_empty());
    }
}
