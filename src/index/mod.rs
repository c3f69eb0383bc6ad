//! Full-text card index.
//!
//! ## Key Types
//!
//! - `CardIndex`: name/effect/id index built from cards or imported from parts
//! - `FieldIndex`: prefix-expanded inverted index for one field
//! - `AssetSource`: fetches pre-built files (`DirSource`, `MemorySource`)
//! - `IndexManifest`: maps part keys to file names
//!
//! Tokenization is CJK-aware: ideographs, kana and hangul are indexed per
//! character, other scripts per word and word prefix.

pub mod card_index;
pub mod field;
pub mod manifest;
pub mod source;
pub mod tokenizer;

pub use card_index::{CardIndex, ImportOutcome, IndexPart, REGISTRY_KEY};
pub use field::{DocId, FieldIndex, IndexField};
pub use manifest::IndexManifest;
pub use source::{fetch_parts, AssetSource, DirSource, MemorySource};
