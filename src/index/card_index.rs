//! Multi-field card index with export and import.
//!
//! ## Key Types
//!
//! - `CardIndex`: one `FieldIndex` per searchable field plus a registry
//! - `IndexPart`: one serialized piece of an exported index
//! - `ImportOutcome`: result of importing parts, matched by the caller to
//!   decide whether a fresh build is needed

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::field::{union, DocId, FieldIndex, IndexField};
use crate::cards::Card;
use crate::core::IndexError;

/// Part key of the registry.
pub const REGISTRY_KEY: &str = "reg";

/// Registry part: the size of the document set the index was built over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Registry {
    doc_count: u32,
}

/// One exported piece of an index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPart {
    pub key: String,
    pub bytes: Vec<u8>,
}

impl IndexPart {
    pub fn new(key: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            bytes,
        }
    }
}

/// Result of importing a serialized index.
#[derive(Debug)]
pub enum ImportOutcome {
    Imported(CardIndex),
    Failed(IndexError),
}

impl ImportOutcome {
    /// Check if the import succeeded.
    #[must_use]
    pub fn is_imported(&self) -> bool {
        matches!(self, ImportOutcome::Imported(_))
    }
}

/// Full-text index over card name, effect and id.
///
/// Documents are positions in the card array the index was built from.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::cards::Card;
/// use rust_ccg_search::index::CardIndex;
///
/// let cards = vec![
///     Card::new("S1/001", "C001", "S1").with_name("Fireheart"),
///     Card::new("S1/002", "C002", "S1").with_effect("Deal fire damage."),
/// ];
/// let index = CardIndex::build(&cards);
/// assert_eq!(index.search("fire"), vec![0, 1]);
/// assert_eq!(index.search("s1"), vec![0, 1]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardIndex {
    doc_count: usize,
    name: FieldIndex,
    effect: FieldIndex,
    id: FieldIndex,
}

impl CardIndex {
    /// Build the index from scratch.
    #[must_use]
    pub fn build(cards: &[Card]) -> Self {
        let started = Instant::now();
        let mut index = CardIndex {
            doc_count: cards.len(),
            ..Default::default()
        };

        for (doc, card) in (0..).zip(cards) {
            index.name.add(doc, card.name_text());
            index.effect.add(doc, card.effect_text());
            index.id.add(doc, &card.id);
        }

        log::debug!(
            "built index over {} cards ({} name terms, {} effect terms) in {:?}",
            index.doc_count,
            index.name.term_count(),
            index.effect.term_count(),
            started.elapsed()
        );
        index
    }

    /// Number of documents covered.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    /// Index for one field.
    #[must_use]
    pub fn field(&self, field: IndexField) -> &FieldIndex {
        match field {
            IndexField::Name => &self.name,
            IndexField::Effect => &self.effect,
            IndexField::Id => &self.id,
        }
    }

    fn field_mut(&mut self, field: IndexField) -> &mut FieldIndex {
        match field {
            IndexField::Name => &mut self.name,
            IndexField::Effect => &mut self.effect,
            IndexField::Id => &mut self.id,
        }
    }

    /// Positions matching `keyword` in any field, ascending.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<DocId> {
        IndexField::ALL
            .into_iter()
            .map(|field| self.field(field).search(keyword))
            .fold(Vec::new(), |acc, hits| union(&acc, &hits))
    }

    /// Serialize the index into parts.
    pub fn export(&self) -> Result<Vec<IndexPart>, IndexError> {
        let doc_count = u32::try_from(self.doc_count).map_err(|_| IndexError::Encode {
            key: REGISTRY_KEY.to_string(),
            reason: format!("{} documents exceed the index limit", self.doc_count),
        })?;

        let mut parts = Vec::with_capacity(IndexField::ALL.len() + 1);
        parts.push(IndexPart::new(
            REGISTRY_KEY,
            encode(REGISTRY_KEY, &Registry { doc_count })?,
        ));
        for field in IndexField::ALL {
            let key = field.part_key();
            parts.push(IndexPart::new(key, encode(key, self.field(field))?));
        }
        Ok(parts)
    }

    /// Rebuild an index from exported parts.
    ///
    /// Every part must decode, all fields and the registry must be present,
    /// and the registry must cover exactly `expected_docs` documents.
    pub fn import<I>(parts: I, expected_docs: usize) -> ImportOutcome
    where
        I: IntoIterator<Item = IndexPart>,
    {
        match Self::try_import(parts, expected_docs) {
            Ok(index) => ImportOutcome::Imported(index),
            Err(err) => ImportOutcome::Failed(err),
        }
    }

    fn try_import<I>(parts: I, expected_docs: usize) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = IndexPart>,
    {
        let mut registry: Option<Registry> = None;
        let mut seen = [false; 3];
        let mut index = CardIndex::default();

        for part in parts {
            if part.key == REGISTRY_KEY {
                registry = Some(decode(&part.key, &part.bytes)?);
                continue;
            }
            let field = IndexField::from_part_key(&part.key)
                .ok_or_else(|| IndexError::UnknownPart(part.key.clone()))?;
            *index.field_mut(field) = decode(&part.key, &part.bytes)?;
            seen[field as usize] = true;
        }

        let registry = registry.ok_or(IndexError::MissingPart(REGISTRY_KEY))?;
        if let Some(field) = IndexField::ALL.into_iter().find(|f| !seen[*f as usize]) {
            return Err(IndexError::MissingPart(field.part_key()));
        }

        let found = registry.doc_count as usize;
        if found != expected_docs {
            return Err(IndexError::DocCountMismatch {
                expected: expected_docs,
                found,
            });
        }
        for field in IndexField::ALL {
            if !index.field(field).postings_sorted() {
                return Err(IndexError::Decode {
                    key: field.part_key().to_string(),
                    reason: "posting list not in ascending order".to_string(),
                });
            }
            if let Some(max) = index.field(field).max_doc() {
                if max as usize >= found {
                    return Err(IndexError::Decode {
                        key: field.part_key().to_string(),
                        reason: format!("document {} out of range", max),
                    });
                }
            }
        }

        index.doc_count = found;
        Ok(index)
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, IndexError> {
    bincode::serialize(value).map_err(|e| IndexError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn decode<T: for<'de> Deserialize<'de>>(key: &str, bytes: &[u8]) -> Result<T, IndexError> {
    bincode::deserialize(bytes).map_err(|e| IndexError::Decode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
