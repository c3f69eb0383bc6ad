//! Card model: the flat card record, stat values and the catalog.
//!
//! ## Key Types
//!
//! - `Card`: one printing, with base-card fields merged in
//! - `StatValue`: a number or the `"-"` sentinel
//! - `Catalog`: the working card array with id and base-id lookup

pub mod attributes;
pub mod definition;
pub mod registry;

pub use attributes::{StatValue, SENTINEL};
pub use definition::{Card, TraitList};
pub use registry::Catalog;
