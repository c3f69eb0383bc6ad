//! Keyword search and attribute filtering.
//!
//! ## Key Types
//!
//! - `QueryEngine`: owns the catalog, the index and the keyword working set
//! - `FilterSet`: attribute selections, all optional
//! - `SearchMode`: precise (literal containment) or fuzzy (index only)

pub mod engine;
pub mod filters;
pub mod mode;

pub use engine::{is_exact_match, QueryEngine};
pub use filters::{CompiledFilter, FilterSet, MIN_KEYWORD_CHARS};
pub use mode::SearchMode;
