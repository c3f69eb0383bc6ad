//! # rust-ccg-search
//!
//! Card search-and-filter engine for trading card game deck builders.
//!
//! ## Design Principles
//!
//! 1. **Two-Phase Queries**: A keyword search selects a working set once;
//!    attribute filters then run over it as often as the UI changes them,
//!    without touching the index.
//!
//! 2. **One Owner**: Engine state lives on a single worker thread. Callers
//!    send owned requests and await owned replies, so nothing is shared.
//!
//! 3. **Build Always Works**: A pre-built index is an optimization. Any
//!    failure to fetch or import one falls back to building from the cards.
//!
//! ## Data Flow
//!
//! ```text
//! product files ──normalize──▶ cards ──links──▶ linked cards
//!                                                   │
//!                     bundle (gzip, chunked) ◀──────┤
//!                                                   ▼
//!                          worker: init ─▶ index ─▶ search ─▶ filter
//! ```
//!
//! ## Modules
//!
//! - `core`: Configuration and errors
//! - `cards`: The flat card record, stat values and the catalog
//! - `normalize`: Product files to cards, filter option tables
//! - `links`: Cross references between cards quoting each other
//! - `index`: CJK-aware full-text index, export/import, asset sources
//! - `query`: Keyword search and attribute filtering
//! - `worker`: Background worker thread with an async interface
//! - `bundle`: Compressed, chunked card database files

pub mod core;
pub mod cards;
pub mod normalize;
pub mod links;
pub mod index;
pub mod query;
pub mod worker;
pub mod bundle;

// Re-export commonly used types
pub use crate::core::{CatalogError, EngineConfig, IndexError, InitOptions, Result};

pub use crate::cards::{Card, Catalog, StatValue, TraitList, SENTINEL};

pub use crate::normalize::{
    load_raw_files, normalize, process_raw_data,
    FilterOptions, LoadReport, ProcessedCatalog, RawFile, StatRange,
};

pub use crate::links::{resolve_links, LinkGraph, MentionMatcher, NameMatcher};

pub use crate::index::{
    AssetSource, CardIndex, DirSource, ImportOutcome, IndexManifest, IndexPart, MemorySource,
};

pub use crate::query::{FilterSet, QueryEngine, SearchMode};

pub use crate::worker::{Engine, IndexOrigin, WorkerHandle, WorkerHost};

pub use crate::bundle::{content_version, BundleManifest, CardBundle, EncodedBundle};
