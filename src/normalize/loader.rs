//! Loading product files from disk.
//!
//! Each product prefix maps to `<dir>/<prefix>.json`. A file that cannot be
//! read or parsed is recorded as a failure; the remaining files still load so
//! the catalog stays usable with whatever arrived.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::raw::RawFile;
use crate::core::{CatalogError, Result};

/// A product file that failed to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadFailure {
    pub prefix: String,
    pub reason: String,
}

/// Outcome of loading a set of product files.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// Files that loaded, in request order.
    pub files: Vec<RawFile>,

    /// Files that did not.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True when every requested file loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Prefixes that failed to load.
    pub fn failed_prefixes(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.prefix.as_str())
    }
}

/// Read and parse one product file.
pub fn read_raw_file(path: &Path, prefix: &str) -> Result<RawFile> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content: Value = serde_json::from_str(&text)?;
    Ok(RawFile::new(prefix, content))
}

/// Load `<dir>/<prefix>.json` for every prefix.
///
/// ## Example
///
/// ```no_run
/// use rust_ccg_search::normalize::load_raw_files;
///
/// let report = load_raw_files("assets/card-data", &["S1", "S2"]);
/// for prefix in report.failed_prefixes() {
///     eprintln!("could not load {}", prefix);
/// }
/// ```
pub fn load_raw_files<S: AsRef<str>>(dir: impl AsRef<Path>, prefixes: &[S]) -> LoadReport {
    let dir = dir.as_ref();
    let mut report = LoadReport::default();

    for prefix in prefixes {
        let prefix = prefix.as_ref();
        let path = dir.join(format!("{}.json", prefix));

        match read_raw_file(&path, prefix) {
            Ok(file) => report.files.push(file),
            Err(e) => {
                log::warn!("skipping product file '{}': {}", prefix, e);
                report.failures.push(LoadFailure {
                    prefix: prefix.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix_list() {
        let dir = tempfile::tempdir().unwrap();
        let report = load_raw_files::<&str>(dir.path(), &[]);
        assert!(report.files.is_empty());
        assert!(report.is_complete());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let report = load_raw_files(dir.path(), &["S1"]);
        assert!(report.files.is_empty());
        assert_eq!(report.failed_prefixes().collect::<Vec<_>>(), vec!["S1"]);
    }

    #[test]
    fn test_read_raw_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("S1.json");
        fs::write(&path, r#"{"C001": {"all_cards": []}}"#).unwrap();

        let file = read_raw_file(&path, "S1").unwrap();
        assert_eq!(file.card_id_prefix, "S1");
        assert!(file.content.get("C001").is_some());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("S1.json");
        fs::write(&path, "{ not json").unwrap();

        let result = read_raw_file(&path, "S1");
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }
}
