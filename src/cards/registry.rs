//! Card catalog for lookup by id and base id.
//!
//! The `Catalog` owns the working card array. Positions in that array are
//! the document keys of the full-text index, so the order is fixed once the
//! catalog is built.

use rustc_hash::FxHashMap;

use super::definition::Card;

/// Working set of cards with id and base-id lookup.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::cards::{Card, Catalog};
///
/// let catalog = Catalog::new(vec![
///     Card::new("S1/001", "C001", "S1").with_name("Alpha"),
///     Card::new("S1/001S", "C001", "S1").with_name("Alpha"),
/// ]);
///
/// assert_eq!(catalog.get("S1/001").unwrap().name_text(), "Alpha");
/// assert_eq!(catalog.printings("C001").count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    by_id: FxHashMap<String, u32>,
    by_base_id: FxHashMap<String, Vec<u32>>,
}

impl Catalog {
    /// Build a catalog over the given cards, keeping their order.
    ///
    /// When two printings share an id, `get` returns the first one.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let mut by_id = FxHashMap::default();
        let mut by_base_id: FxHashMap<String, Vec<u32>> = FxHashMap::default();

        for (pos, card) in cards.iter().enumerate() {
            let pos = pos as u32;
            by_id.entry(card.id.clone()).or_insert(pos);
            by_base_id.entry(card.base_id.clone()).or_default().push(pos);
        }

        Self {
            cards,
            by_id,
            by_base_id,
        }
    }

    /// Get a card by its full id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.by_id.get(id).map(|&pos| &self.cards[pos as usize])
    }

    /// Get a card by its position in the working array.
    #[must_use]
    pub fn at(&self, pos: u32) -> Option<&Card> {
        self.cards.get(pos as usize)
    }

    /// All printings of a base card, in catalog order.
    pub fn printings<'a>(&'a self, base_id: &str) -> impl Iterator<Item = &'a Card> + 'a {
        self.by_base_id
            .get(base_id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.cards[pos as usize])
    }

    /// Find a card within one product prefix by full id or base id.
    ///
    /// Returns the first match in catalog order. Several matches are logged,
    /// since the caller probably expected a unique card.
    #[must_use]
    pub fn find_in_prefix(&self, prefix: &str, id: &str) -> Option<&Card> {
        let mut matches = self
            .cards
            .iter()
            .filter(|c| c.card_id_prefix == prefix && (c.id == id || c.base_id == id));

        let first = matches.next();
        match first {
            None => log::warn!("card '{}' not found in prefix '{}'", id, prefix),
            Some(card) => {
                let extra = matches.count();
                if extra > 0 {
                    log::warn!(
                        "{} cards match '{}' in prefix '{}'; using {}",
                        extra + 1,
                        id,
                        prefix,
                        card.id
                    );
                }
            }
        }
        first
    }

    /// Check if a card id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over all cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}
