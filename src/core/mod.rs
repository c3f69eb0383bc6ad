//! Core engine types: configuration and errors.
//!
//! Everything else in the crate builds on these. Configuration is plain
//! data with builder methods; errors are typed enums.

pub mod config;
pub mod error;

pub use config::{EngineConfig, InitOptions};
pub use error::{CatalogError, IndexError, Result};
