//! Error types for catalog processing, indexing and the worker host.
//!
//! Two families exist:
//! - `CatalogError`: failures surfaced to the caller (bad input shape,
//!   unreadable files, a worker that is not ready or gone).
//! - `IndexError`: failures while importing a serialized index. These are
//!   absorbed by the engine, which falls back to building the index.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by catalog processing and the worker host.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A raw card document did not have the expected shape.
    #[error("malformed card data in '{prefix}' (base id '{base_id}'): {reason}")]
    Shape {
        prefix: String,
        base_id: String,
        reason: String,
    },

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The card-name matcher could not be compiled.
    #[error("failed to compile card name matcher: {0}")]
    Pattern(#[from] regex::Error),

    /// An index operation failed outside the import fallback path.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Search mode string was neither "precise" nor "fuzzy".
    #[error("unknown search mode '{0}'")]
    InvalidMode(String),

    /// A query arrived before the engine was initialized.
    #[error("engine is not initialized")]
    NotReady,

    /// The worker thread has terminated.
    #[error("worker has terminated")]
    WorkerGone,

    /// The worker thread could not be started.
    #[error("failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A card database bundle could not be assembled or decoded.
    #[error("bundle error: {0}")]
    Bundle(String),
}

impl CatalogError {
    /// Shorthand for a shape error.
    pub fn shape(
        prefix: impl Into<String>,
        base_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CatalogError::Shape {
            prefix: prefix.into(),
            base_id: base_id.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while importing a serialized index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// An index part file could not be fetched.
    #[error("failed to fetch index file '{file}': {reason}")]
    Fetch { file: String, reason: String },

    /// An index part could not be decoded.
    #[error("failed to decode index part '{key}': {reason}")]
    Decode { key: String, reason: String },

    /// An index part could not be encoded.
    #[error("failed to encode index part '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// A part key does not belong to any index field.
    #[error("unknown index part '{0}'")]
    UnknownPart(String),

    /// A required part was never supplied.
    #[error("missing index part '{0}'")]
    MissingPart(&'static str),

    /// The imported registry was built over a different card set.
    #[error("index covers {found} documents, expected {expected}")]
    DocCountMismatch { expected: usize, found: usize },
}
