//! Two-phase query engine.
//!
//! A keyword search narrows the catalog to a working set, which is kept
//! until the next keyword search. Attribute filters then run over that
//! working set as often as needed without touching the index again.

use std::time::Instant;

use super::filters::FilterSet;
use super::mode::SearchMode;
use crate::cards::{Card, Catalog};
use crate::core::EngineConfig;
use crate::index::{CardIndex, DocId};

/// Check if a card counts as an exact hit for `keyword`.
///
/// Exact hits are sorted ahead of the rest. The effect check is
/// case-sensitive containment, the name and id checks are equality.
#[must_use]
pub fn is_exact_match(card: &Card, keyword: &str) -> bool {
    card.name_text() == keyword || card.id == keyword || card.effect_text().contains(keyword)
}

/// Case-insensitive containment in name, id or effect.
fn contains_literally(card: &Card, lower_keyword: &str) -> bool {
    card.name_text().to_lowercase().contains(lower_keyword)
        || card.id.to_lowercase().contains(lower_keyword)
        || card.effect_text().to_lowercase().contains(lower_keyword)
}

/// Catalog, index and the current keyword working set.
#[derive(Debug)]
pub struct QueryEngine {
    catalog: Catalog,
    index: CardIndex,
    /// Positions selected by the last keyword search. `None` until the
    /// first search, which filters treat as "all cards".
    keyword_cache: Option<Vec<DocId>>,
    config: EngineConfig,
}

impl QueryEngine {
    /// Create an engine over a catalog and an index built from the same
    /// card order.
    pub fn new(catalog: Catalog, index: CardIndex, config: EngineConfig) -> Self {
        Self {
            catalog,
            index,
            keyword_cache: None,
            config,
        }
    }

    /// Create an engine, building the index from the cards.
    pub fn from_cards(cards: Vec<Card>, config: EngineConfig) -> Self {
        let index = CardIndex::build(&cards);
        Self::new(Catalog::new(cards), index, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &CardIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of cards the next filter call will consider.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.keyword_cache
            .as_ref()
            .map_or(self.catalog.len(), Vec::len)
    }

    /// Forget the last keyword search.
    pub fn clear_keyword(&mut self) {
        self.keyword_cache = None;
    }

    /// Run a keyword search with the configured default mode.
    pub fn search(&mut self, keyword: Option<&str>) {
        self.search_by_keyword(keyword, self.config.default_mode);
    }

    /// Replace the working set with the cards matching `keyword`.
    ///
    /// - no keyword or `""`: every card
    /// - shorter than `min_keyword_chars` characters: no card
    /// - otherwise: index hits, confirmed by literal containment in
    ///   `Precise` mode, exact hits first
    pub fn search_by_keyword(&mut self, keyword: Option<&str>, mode: SearchMode) {
        let keyword = match keyword {
            Some(k) if !k.is_empty() => k,
            _ => {
                self.keyword_cache = Some((0..self.doc_count()).collect());
                return;
            }
        };

        if keyword.chars().count() < self.config.min_keyword_chars {
            self.keyword_cache = Some(Vec::new());
            return;
        }

        let started = Instant::now();
        let hits = self.index.search(keyword);
        let candidates = hits.len();

        let mut results: Vec<DocId> = match mode {
            SearchMode::Precise => {
                let lower = keyword.to_lowercase();
                hits.into_iter()
                    .filter(|&doc| {
                        self.catalog
                            .at(doc)
                            .map_or(false, |card| contains_literally(card, &lower))
                    })
                    .collect()
            }
            SearchMode::Fuzzy => hits,
        };

        // Stable: ties keep ascending position order.
        results.sort_by_key(|&doc| {
            !self
                .catalog
                .at(doc)
                .map_or(false, |card| is_exact_match(card, keyword))
        });

        if self.config.log_timings {
            log::debug!(
                "search '{}' ({}) over {} cards: {} candidates, {} results in {:?}",
                keyword,
                mode,
                self.catalog.len(),
                candidates,
                results.len(),
                started.elapsed()
            );
        }

        self.keyword_cache = Some(results);
    }

    /// Cards of the working set that pass `filters`, in working-set order.
    ///
    /// Does not change the working set.
    #[must_use]
    pub fn filter_by_attributes(&self, filters: &FilterSet) -> Vec<Card> {
        let compiled = filters.compile();
        match &self.keyword_cache {
            Some(docs) => docs
                .iter()
                .filter_map(|&doc| self.catalog.at(doc))
                .filter(|card| compiled.matches(card))
                .cloned()
                .collect(),
            None => self
                .catalog
                .iter()
                .filter(|card| compiled.matches(card))
                .cloned()
                .collect(),
        }
    }

    fn doc_count(&self) -> DocId {
        DocId::try_from(self.catalog.len()).unwrap_or(DocId::MAX)
    }
}
