//! Index manifest: which files hold an exported index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::card_index::IndexPart;
use super::source::MemorySource;

/// JSON manifest describing exported index parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub version: String,
    pub hash: String,
    /// Part key -> file name.
    pub files: BTreeMap<String, String>,
}

impl IndexManifest {
    /// File name used for one part: `{key}.{hash}.bin`.
    #[must_use]
    pub fn file_name(key: &str, hash: &str) -> String {
        format!("{}.{}.bin", key, hash)
    }

    /// Manifest for `parts`, naming each file after its key and `hash`.
    pub fn for_parts(
        version: impl Into<String>,
        hash: impl Into<String>,
        parts: &[IndexPart],
    ) -> Self {
        let hash = hash.into();
        let files = parts
            .iter()
            .map(|p| (p.key.clone(), Self::file_name(&p.key, &hash)))
            .collect();
        Self {
            version: version.into(),
            hash,
            files,
        }
    }

    /// Store every part in `source` under its manifest file name.
    ///
    /// Parts whose key is not in the manifest are skipped.
    pub fn publish(&self, parts: Vec<IndexPart>, source: &MemorySource) {
        for part in parts {
            if let Some(file) = self.files.get(&part.key) {
                source.insert(file.clone(), part.bytes);
            }
        }
    }
}
