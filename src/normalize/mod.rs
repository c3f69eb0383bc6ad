//! Card normalization: nested product files to flat card records.
//!
//! ## Pipeline
//!
//! 1. Parse each base-card entry into shared fields plus printings.
//! 2. Merge each printing over its base card (printing fields win).
//! 3. Mark the canonical printing (`is_lowest_rarity`).
//! 4. Collect filter options.
//!
//! `process_raw_data` additionally resolves card links and is the stateless
//! transform exposed by the worker.
//!
//! ## Lowest rarity
//!
//! Within a base card, printings with the shortest id are the canonical
//! ones. A base card with a single printing whose id ends in a letter is an
//! alternate art and gets `false`.

pub mod loader;
pub mod options;
pub mod raw;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::Card;
use crate::core::{CatalogError, Result};
use crate::links;

pub use loader::{load_raw_files, read_raw_file, LoadFailure, LoadReport};
pub use options::{FilterOptions, OptionsAccumulator, StatRange};
pub use raw::{CardFields, RawBaseCard, RawFile, RawPrinting};

/// Flattened cards with their filter options (links not yet resolved).
#[derive(Clone, Debug, Default)]
pub struct Normalized {
    pub cards: Vec<Card>,
    pub options: FilterOptions,
}

/// Result of `process_raw_data`: linked cards plus filter options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedCatalog {
    pub all_cards: Vec<Card>,
    #[serde(flatten)]
    pub options: FilterOptions,
}

/// Decide whether a printing is the canonical one of its base card.
#[must_use]
pub fn is_lowest_rarity(id: &str, min_id_len: usize, printing_count: usize) -> bool {
    let ends_in_letter = id.chars().last().is_some_and(|c| c.is_ascii_alphabetic());
    if printing_count == 1 && ends_in_letter {
        return false;
    }
    id.chars().count() == min_id_len
}

/// Flatten product files into card records.
///
/// Fails on the first malformed document; no partial result is returned.
pub fn normalize(files: Vec<RawFile>) -> Result<Normalized> {
    let mut cards = Vec::new();
    let mut options = OptionsAccumulator::new();

    for file in files {
        let prefix = file.card_id_prefix;
        let Value::Object(entries) = file.content else {
            return Err(CatalogError::shape(&prefix, "", "document is not an object"));
        };

        for (base_id, value) in entries {
            let base = RawBaseCard::parse(&prefix, &base_id, value)?;
            if base.printings.is_empty() {
                continue;
            }

            let printing_count = base.printings.len();
            let min_id_len = base
                .printings
                .iter()
                .map(|p| p.id.chars().count())
                .min()
                .unwrap_or(0);

            for printing in base.printings {
                let lowest = is_lowest_rarity(&printing.id, min_id_len, printing_count);
                let merged = CardFields::merge(&base.fields, printing.fields);
                let card = merged.into_card(printing.id, &base_id, &prefix, lowest);
                options.observe(&card);
                cards.push(card);
            }
        }
    }

    Ok(Normalized {
        cards,
        options: options.finish(),
    })
}

/// Normalize product files, resolve links and collect filter options.
///
/// Stateless: usable without a worker.
pub fn process_raw_data(files: Vec<RawFile>) -> Result<ProcessedCatalog> {
    let Normalized { mut cards, options } = normalize(files)?;
    links::resolve_links(&mut cards)?;

    Ok(ProcessedCatalog {
        all_cards: cards,
        options,
    })
}
