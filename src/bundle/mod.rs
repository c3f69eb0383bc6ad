//! Card database bundles.
//!
//! A bundle is the processed catalog (cards, filter options and a content
//! version) as gzip-compressed JSON, optionally split into fixed-size
//! chunks. A small JSON manifest names the files and carries the version,
//! so a client can tell whether its cached copy is stale before
//! downloading anything.
//!
//! ## Key Types
//!
//! - `BundleManifest`: version, hash and file list
//! - `CardBundle`: the decoded catalog
//! - `EncodedBundle`: manifest plus the compressed files, ready to publish

pub mod codec;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{CatalogError, Result};
use crate::index::{AssetSource, MemorySource};
use crate::normalize::{FilterOptions, ProcessedCatalog};

pub use codec::{compress, content_hash, content_version, decompress};

/// Name of the manifest file.
pub const MANIFEST_FILE: &str = "card-db-manifest.json";

/// Default chunk size for published bundles.
pub const DEFAULT_CHUNK_SIZE: usize = 512 * 1024;

/// Describes where a bundle's bytes live.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleManifest {
    pub version: String,
    pub hash: String,
    /// True when the bundle is split into `chunks`.
    #[serde(default)]
    pub chunked: bool,
    /// Chunk files in concatenation order.
    #[serde(default)]
    pub chunks: Vec<String>,
    /// The single bundle file when not chunked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub card_count: usize,
}

impl BundleManifest {
    /// Fetch and parse the manifest from `source`.
    pub fn fetch<S: AssetSource + ?Sized>(source: &S) -> Result<Self> {
        let bytes = source
            .fetch(MANIFEST_FILE)
            .map_err(|e| CatalogError::Bundle(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Files holding the compressed bundle, in order.
    pub fn files(&self) -> Result<Vec<&str>> {
        if self.chunked {
            if self.chunks.is_empty() {
                return Err(CatalogError::Bundle("chunked bundle lists no chunks".into()));
            }
            Ok(self.chunks.iter().map(String::as_str).collect())
        } else {
            self.file_name
                .as_deref()
                .map(|f| vec![f])
                .ok_or_else(|| CatalogError::Bundle("manifest names no bundle file".into()))
        }
    }

    /// Check if a cached copy at `version` can be used as is.
    #[must_use]
    pub fn is_current(&self, version: Option<&str>) -> bool {
        version == Some(self.version.as_str())
    }
}

/// The decoded card database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBundle {
    pub version: String,
    pub filter_options: FilterOptions,
    pub cards: Vec<Card>,
}

/// A bundle ready to publish: manifest plus compressed files.
#[derive(Clone, Debug)]
pub struct EncodedBundle {
    pub manifest: BundleManifest,
    /// `(file name, bytes)` in manifest order.
    pub files: Vec<(String, Vec<u8>)>,
}

impl EncodedBundle {
    /// Serialized manifest.
    pub fn manifest_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.manifest)?)
    }

    /// Store the manifest and every file in `source`.
    pub fn publish(&self, source: &MemorySource) -> Result<()> {
        source.insert(MANIFEST_FILE, self.manifest_json()?);
        for (name, bytes) in &self.files {
            source.insert(name.clone(), bytes.clone());
        }
        Ok(())
    }

    /// Write the manifest and every file into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let write = |name: &str, bytes: &[u8]| {
            let path = dir.join(name);
            std::fs::write(&path, bytes).map_err(|source| CatalogError::Io { path, source })
        };
        write(MANIFEST_FILE, &self.manifest_json()?)?;
        for (name, bytes) in &self.files {
            write(name, bytes)?;
        }
        Ok(())
    }
}

impl CardBundle {
    /// Bundle a processed catalog, computing its content version.
    pub fn from_catalog(catalog: ProcessedCatalog) -> Result<Self> {
        Ok(Self {
            version: content_version(&catalog.all_cards)?,
            filter_options: catalog.options,
            cards: catalog.all_cards,
        })
    }

    /// Split into the catalog shape `process_raw_data` returns.
    pub fn into_catalog(self) -> ProcessedCatalog {
        ProcessedCatalog {
            all_cards: self.cards,
            options: self.filter_options,
        }
    }

    /// Compress the bundle into files of at most `chunk_size` bytes.
    ///
    /// A `chunk_size` of zero writes one unchunked file.
    pub fn encode(&self, chunk_size: usize) -> Result<EncodedBundle> {
        let hash = self.version.trim_start_matches('v').to_string();
        let packed = compress(&serde_json::to_vec(self)?)?;

        let mut manifest = BundleManifest {
            version: self.version.clone(),
            hash: hash.clone(),
            card_count: self.cards.len(),
            ..BundleManifest::default()
        };

        let files: Vec<(String, Vec<u8>)> = if chunk_size == 0 {
            let name = format!("all_cards_db.{}.bin", hash);
            manifest.file_name = Some(name.clone());
            vec![(name, packed)]
        } else {
            manifest.chunked = true;
            packed
                .chunks(chunk_size)
                .enumerate()
                .map(|(i, chunk)| {
                    (
                        format!("all_cards_db.{}.part{}.bin", hash, i + 1),
                        chunk.to_vec(),
                    )
                })
                .collect()
        };
        manifest.chunks = if manifest.chunked {
            files.iter().map(|(name, _)| name.clone()).collect()
        } else {
            Vec::new()
        };

        log::debug!(
            "encoded bundle {} ({} cards) into {} file(s), {} bytes compressed",
            self.version,
            self.cards.len(),
            files.len(),
            packed_len(&files)
        );

        Ok(EncodedBundle { manifest, files })
    }

    /// Download and decode the bundle described by `manifest`.
    ///
    /// Every file must be present. A version or card count differing from
    /// the manifest is logged but accepted.
    pub fn load<S: AssetSource + ?Sized>(manifest: &BundleManifest, source: &S) -> Result<Self> {
        let mut packed = Vec::new();
        for file in manifest.files()? {
            let bytes = source
                .fetch(file)
                .map_err(|e| CatalogError::Bundle(e.to_string()))?;
            packed.extend_from_slice(&bytes);
        }

        let bundle: CardBundle = serde_json::from_slice(&decompress(&packed)?)?;
        if bundle.version != manifest.version {
            log::warn!(
                "bundle version {} differs from manifest version {}",
                bundle.version,
                manifest.version
            );
        }
        if bundle.cards.len() != manifest.card_count {
            log::warn!(
                "bundle holds {} cards, manifest lists {}",
                bundle.cards.len(),
                manifest.card_count
            );
        }
        log::info!(
            "loaded card bundle {} with {} cards",
            bundle.version,
            bundle.cards.len()
        );
        Ok(bundle)
    }

    /// Fetch the manifest from `source`, then the bundle it describes.
    pub fn fetch<S: AssetSource + ?Sized>(source: &S) -> Result<Self> {
        let manifest = BundleManifest::fetch(source)?;
        Self::load(&manifest, source)
    }
}

fn packed_len(files: &[(String, Vec<u8>)]) -> usize {
    files.iter().map(|(_, bytes)| bytes.len()).sum()
}
