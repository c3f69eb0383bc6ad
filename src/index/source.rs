//! Where pre-built asset files come from.
//!
//! Index parts and bundle chunks are fetched by file name through
//! `AssetSource`. The engine never touches the filesystem directly, so a
//! host can serve files from disk, memory or anything else.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::card_index::IndexPart;
use crate::core::IndexError;

/// Fetches asset files by name.
pub trait AssetSource: Send + Sync {
    /// Read the full contents of `file`.
    fn fetch(&self, file: &str) -> Result<Vec<u8>, IndexError>;
}

impl<S: AssetSource + ?Sized> AssetSource for Arc<S> {
    fn fetch(&self, file: &str) -> Result<Vec<u8>, IndexError> {
        (**self).fetch(file)
    }
}

impl<S: AssetSource + ?Sized> AssetSource for Box<S> {
    fn fetch(&self, file: &str) -> Result<Vec<u8>, IndexError> {
        (**self).fetch(file)
    }
}

/// Files under a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, file: &str) -> Result<Vec<u8>, IndexError> {
        let relative = Path::new(file);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(IndexError::Fetch {
                file: file.to_string(),
                reason: "path escapes the asset directory".to_string(),
            });
        }
        std::fs::read(self.root.join(relative)).map_err(|e| IndexError::Fetch {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory file table.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    // Map operations never panic midway, so a poisoned map is still whole.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.write().unwrap_or_else(|poisoned| {
            log::warn!("memory source lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    /// Add or replace a file.
    pub fn insert(&self, file: impl Into<String>, bytes: Vec<u8>) {
        self.write().insert(file.into(), bytes);
    }

    /// Builder form of `insert`.
    pub fn with_file(self, file: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(file, bytes);
        self
    }

    /// Remove a file, returning its contents.
    pub fn remove(&self, file: &str) -> Option<Vec<u8>> {
        self.write().remove(file)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, file: &str) -> Result<Vec<u8>, IndexError> {
        self.read().get(file).cloned().ok_or_else(|| IndexError::Fetch {
            file: file.to_string(),
            reason: "not found".to_string(),
        })
    }
}

/// Fetch every index part named in `files` (part key -> file name).
///
/// Stops at the first file that cannot be fetched.
pub fn fetch_parts<S>(
    source: &S,
    files: &BTreeMap<String, String>,
) -> Result<Vec<IndexPart>, IndexError>
where
    S: AssetSource + ?Sized,
{
    files
        .iter()
        .map(|(key, file)| {
            source
                .fetch(file)
                .map(|bytes| IndexPart::new(key.clone(), bytes))
        })
        .collect()
}
