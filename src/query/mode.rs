//! Keyword search modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CatalogError;

/// How index hits are confirmed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Keep only hits whose name, id or effect literally contains the
    /// keyword (case-insensitive).
    #[default]
    Precise,
    /// Trust the tokenized index alone.
    Fuzzy,
}

impl SearchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SearchMode::Precise => "precise",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "precise" => Ok(SearchMode::Precise),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            other => Err(CatalogError::InvalidMode(other.to_string())),
        }
    }
}
