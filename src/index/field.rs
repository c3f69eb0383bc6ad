//! Inverted index over one text field.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::tokenizer::{index_terms, tokenize};

/// Document key: position of the card in the working array.
pub type DocId = u32;

/// Indexed card fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexField {
    Name,
    Effect,
    Id,
}

impl IndexField {
    /// All indexed fields, in search order.
    pub const ALL: [IndexField; 3] = [IndexField::Name, IndexField::Effect, IndexField::Id];

    /// Part key used when the field is exported.
    #[must_use]
    pub const fn part_key(self) -> &'static str {
        match self {
            IndexField::Name => "name.map",
            IndexField::Effect => "effect.map",
            IndexField::Id => "id.map",
        }
    }

    /// Field for an exported part key.
    #[must_use]
    pub fn from_part_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.part_key() == key)
    }
}

/// Term → sorted document list for one field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldIndex {
    postings: FxHashMap<String, Vec<DocId>>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `text` under `doc`.
    ///
    /// Documents must be added in ascending order so posting lists stay
    /// sorted.
    pub fn add(&mut self, doc: DocId, text: &str) {
        for term in index_terms(text) {
            let list = self.postings.entry(term).or_default();
            if list.last() != Some(&doc) {
                debug_assert!(list.last().map_or(true, |&last| last < doc));
                list.push(doc);
            }
        }
    }

    /// Documents containing every token of `query` (prefix match per token).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<DocId> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut lists = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match self.postings.get(token) {
                Some(list) => lists.push(list.as_slice()),
                None => return Vec::new(),
            }
        }
        lists.sort_unstable_by_key(|l| l.len());

        let mut result = lists[0].to_vec();
        for list in &lists[1..] {
            result = intersect(&result, list);
            if result.is_empty() {
                break;
            }
        }
        result
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Check that every posting list is strictly ascending.
    #[must_use]
    pub fn postings_sorted(&self) -> bool {
        self.postings
            .values()
            .all(|list| list.windows(2).all(|pair| pair[0] < pair[1]))
    }

    /// Largest document id referenced by any posting list.
    #[must_use]
    pub fn max_doc(&self) -> Option<DocId> {
        self.postings.values().filter_map(|l| l.last().copied()).max()
    }
}

/// Intersection of two ascending lists.
fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Union of two ascending lists.
pub(crate) fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}
