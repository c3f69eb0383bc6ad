//! Engine state owned by the worker thread.

use std::fmt;
use std::time::Instant;

use crate::cards::{Card, Catalog};
use crate::core::{EngineConfig, InitOptions};
use crate::index::{fetch_parts, AssetSource, CardIndex, ImportOutcome};
use crate::query::QueryEngine;

/// How the live index was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexOrigin {
    /// Imported from pre-built parts.
    Imported,
    /// Built from the cards.
    Built,
}

impl fmt::Display for IndexOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexOrigin::Imported => f.write_str("loaded from pre-built index"),
            IndexOrigin::Built => f.write_str("built"),
        }
    }
}

/// A ready query engine plus where its index came from.
#[derive(Debug)]
pub struct Engine {
    query: QueryEngine,
    origin: IndexOrigin,
}

impl Engine {
    /// Set up an engine for `cards`.
    ///
    /// Pre-built index parts named in `options` are fetched from `source`
    /// and imported. Any fetch or import failure is logged and the index is
    /// built from the cards instead, so initialization always succeeds.
    pub fn init<S>(
        cards: Vec<Card>,
        options: &InitOptions,
        source: &S,
        config: EngineConfig,
    ) -> Self
    where
        S: AssetSource + ?Sized,
    {
        let started = Instant::now();
        let game = options.game.as_deref().unwrap_or("unknown");
        let version = options.version.as_deref().unwrap_or("unversioned");

        let imported = options
            .prebuilt_parts()
            .and_then(|files| {
                log::info!(
                    "loading pre-built index for {} ({}), {} parts",
                    game,
                    version,
                    files.len()
                );
                match fetch_parts(source, files) {
                    Ok(parts) => Some(parts),
                    Err(err) => {
                        log::warn!("{}; building index from cards", err);
                        None
                    }
                }
            })
            .and_then(|parts| match CardIndex::import(parts, cards.len()) {
                ImportOutcome::Imported(index) => Some(index),
                ImportOutcome::Failed(err) => {
                    log::warn!(
                        "pre-built index rejected: {}; building index from cards",
                        err
                    );
                    None
                }
            });

        let (index, origin) = match imported {
            Some(index) => (index, IndexOrigin::Imported),
            None => (CardIndex::build(&cards), IndexOrigin::Built),
        };

        let log_timings = config.log_timings;
        let query = QueryEngine::new(Catalog::new(cards), index, config);
        if log_timings {
            log::info!(
                "search engine ready for {} cards ({}) in {:?}",
                query.catalog().len(),
                origin,
                started.elapsed()
            );
        }

        Self { query, origin }
    }

    pub fn origin(&self) -> IndexOrigin {
        self.origin
    }

    pub fn query(&self) -> &QueryEngine {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryEngine {
        &mut self.query
    }
}
