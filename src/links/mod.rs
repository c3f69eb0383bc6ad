//! Card links: cross references between cards that quote each other.
//!
//! - `NameMatcher`: finds `「name」` mentions of known card names
//! - `LinkGraph`: symmetric base-id adjacency built from those mentions
//! - `resolve_links`: one-shot pass that fills `Card::link`

pub mod matcher;
pub mod resolver;

pub use matcher::{MentionMatcher, NameMatcher, CLOSE_QUOTE, OPEN_QUOTE};
pub use resolver::{resolve_links, LinkGraph};
