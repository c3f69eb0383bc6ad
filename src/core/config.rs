//! Engine configuration types.
//!
//! Callers configure the engine at two points:
//! - `EngineConfig`: fixed for the lifetime of a worker (keyword thresholds,
//!   default search mode, timing logs).
//! - `InitOptions`: supplied with every `init` call (which game/version is
//!   being loaded, and which pre-built index parts to import).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{SearchMode, MIN_KEYWORD_CHARS};

/// Worker-lifetime engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum keyword length (in characters) that triggers an index search.
    /// Shorter non-empty keywords produce an empty result set.
    pub min_keyword_chars: usize,

    /// Mode used when the caller does not pick one.
    pub default_mode: SearchMode,

    /// Log elapsed time for index builds and searches.
    pub log_timings: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_keyword_chars: MIN_KEYWORD_CHARS,
            default_mode: SearchMode::Precise,
            log_timings: true,
        }
    }
}

impl EngineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum keyword length.
    ///
    /// Values below 1 are clamped to 1 so a non-empty keyword can still search.
    pub fn with_min_keyword_chars(mut self, chars: usize) -> Self {
        self.min_keyword_chars = chars.max(1);
        self
    }

    /// Set the default search mode.
    pub fn with_default_mode(mut self, mode: SearchMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Enable or disable timing logs.
    pub fn with_log_timings(mut self, enabled: bool) -> Self {
        self.log_timings = enabled;
        self
    }
}

/// Options passed with each `init` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    /// Game identifier, for logging only (e.g. "ws", "wsr").
    pub game: Option<String>,

    /// Catalog version, for logging only.
    pub version: Option<String>,

    /// Pre-built index parts: part key -> file name.
    ///
    /// When present and non-empty the engine imports these before
    /// considering a fresh build.
    pub index_files: Option<BTreeMap<String, String>>,
}

impl InitOptions {
    /// Create empty options (fresh index build).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game identifier.
    #[must_use]
    pub fn with_game(mut self, game: impl Into<String>) -> Self {
        self.game = Some(game.into());
        self
    }

    /// Set the catalog version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a pre-built index part.
    #[must_use]
    pub fn with_index_file(mut self, key: impl Into<String>, file: impl Into<String>) -> Self {
        self.index_files
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), file.into());
        self
    }

    /// Index parts to import, if any were supplied.
    #[must_use]
    pub fn prebuilt_parts(&self) -> Option<&BTreeMap<String, String>> {
        self.index_files.as_ref().filter(|files| !files.is_empty())
    }
}
