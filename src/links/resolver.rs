//! Link graph between base cards.
//!
//! A card whose effect quotes another card's name is linked to it, and the
//! quoted card is linked back. Links are kept per base id and then
//! materialized onto every printing as the full ids of the linked printings.

use rustc_hash::{FxHashMap, FxHashSet};

use super::matcher::{MentionMatcher, NameMatcher};
use crate::cards::Card;
use crate::core::Result;

/// Symmetric adjacency between base ids.
#[derive(Clone, Debug, Default)]
pub struct LinkGraph {
    adjacency: FxHashMap<String, Vec<String>>,
    printings: FxHashMap<String, Vec<String>>,
}

impl LinkGraph {
    /// Build the graph from effect-text mentions.
    ///
    /// A name shared by several base cards links to all of them.
    pub fn build<M: MentionMatcher>(cards: &[Card], matcher: &M) -> Self {
        let mut name_to_bases: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        let mut printings: FxHashMap<String, Vec<String>> = FxHashMap::default();

        for card in cards {
            let bases = name_to_bases.entry(card.name_text()).or_default();
            if !bases.contains(&card.base_id.as_str()) {
                bases.push(&card.base_id);
            }
            printings
                .entry(card.base_id.clone())
                .or_default()
                .push(card.id.clone());
        }

        let mut graph = LinkGraph {
            adjacency: FxHashMap::default(),
            printings,
        };

        for card in cards {
            let effect = card.effect_text();
            if effect.is_empty() {
                continue;
            }
            for name in matcher.mentions(effect) {
                let Some(sources) = name_to_bases.get(name) else {
                    continue;
                };
                for source in sources {
                    graph.connect(&card.base_id, source);
                }
            }
        }

        graph
    }

    fn connect(&mut self, from: &str, to: &str) {
        push_unique(self.adjacency.entry(from.to_string()).or_default(), to);
        push_unique(self.adjacency.entry(to.to_string()).or_default(), from);
    }

    /// Base ids linked to `base_id`, in discovery order.
    #[must_use]
    pub fn neighbors(&self, base_id: &str) -> &[String] {
        self.adjacency.get(base_id).map_or(&[], Vec::as_slice)
    }

    /// Check if two base ids are linked.
    #[must_use]
    pub fn is_linked(&self, a: &str, b: &str) -> bool {
        self.neighbors(a).iter().any(|n| n == b)
    }

    /// Number of base ids with at least one link.
    #[must_use]
    pub fn linked_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Full ids of every printing linked to `base_id`, deduplicated.
    #[must_use]
    pub fn linked_ids(&self, base_id: &str) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut ids = Vec::new();
        for neighbor in self.neighbors(base_id) {
            for id in self.printings.get(neighbor).into_iter().flatten() {
                if seen.insert(id.as_str()) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }

    /// Write each card's `link` list.
    pub fn apply(&self, cards: &mut [Card]) {
        let mut resolved: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for card in cards.iter_mut() {
            let ids = resolved
                .entry(card.base_id.clone())
                .or_insert_with(|| self.linked_ids(&card.base_id));
            card.link = ids.clone();
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Populate `link` on every card from quoted names in effect texts.
pub fn resolve_links(cards: &mut [Card]) -> Result<()> {
    let matcher = NameMatcher::new(cards.iter().map(Card::name_text))?;
    let graph = LinkGraph::build(cards, &matcher);
    log::debug!(
        "resolved links for {} base cards across {} cards",
        graph.linked_count(),
        cards.len()
    );
    graph.apply(cards);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, base: &str, name: &str, effect: &str) -> Card {
        Card::new(id, base, "S1").with_name(name).with_effect(effect)
    }

    #[test]
    fn test_mention_links_both_ways() {
        let mut cards = vec![
            card("S1/001", "C001", "Alpha", "Summon 「Beta」."),
            card("S1/002A", "C002", "Beta", ""),
            card("S1/002B", "C002", "Beta", ""),
        ];
        resolve_links(&mut cards).unwrap();

        assert_eq!(cards[0].link, vec!["S1/002A", "S1/002B"]);
        assert_eq!(cards[1].link, vec!["S1/001"]);
        assert_eq!(cards[2].link, vec!["S1/001"]);
    }

    #[test]
    fn test_unknown_name_ignored() {
        let mut cards = vec![card("S1/001", "C001", "Alpha", "Summon 「Nobody」.")];
        resolve_links(&mut cards).unwrap();
        assert!(cards[0].link.is_empty());
    }

    #[test]
    fn test_ambiguous_name_links_all_candidates() {
        let mut cards = vec![
            card("S1/001", "C001", "Alpha", "Search for 「Twin」."),
            card("S1/002", "C002", "Twin", ""),
            card("S2/002", "C102", "Twin", ""),
        ];
        resolve_links(&mut cards).unwrap();

        assert_eq!(cards[0].link, vec!["S1/002", "S2/002"]);
        assert_eq!(cards[1].link, vec!["S1/001"]);
        assert_eq!(cards[2].link, vec!["S1/001"]);
    }

    #[test]
    fn test_mutual_mentions_not_duplicated() {
        let mut cards = vec![
            card("S1/001", "C001", "Alpha", "With 「Beta」."),
            card("S1/002", "C002", "Beta", "With 「Alpha」 and 「Alpha」."),
        ];
        resolve_links(&mut cards).unwrap();

        assert_eq!(cards[0].link, vec!["S1/002"]);
        assert_eq!(cards[1].link, vec!["S1/001"]);
    }

    #[test]
    fn test_self_mention_links_own_printings() {
        let mut cards = vec![
            card("S1/001", "C001", "Alpha", "Put 「Alpha」 into your hand."),
            card("S1/001S", "C001", "Alpha", "Put 「Alpha」 into your hand."),
        ];
        resolve_links(&mut cards).unwrap();
        assert_eq!(cards[0].link, vec!["S1/001", "S1/001S"]);
    }

    #[test]
    fn test_graph_queries() {
        let cards = vec![
            card("S1/001", "C001", "Alpha", "「Beta」"),
            card("S1/002", "C002", "Beta", ""),
            card("S1/003", "C003", "Gamma", ""),
        ];
        let matcher = NameMatcher::new(cards.iter().map(Card::name_text)).unwrap();
        let graph = LinkGraph::build(&cards, &matcher);

        assert!(graph.is_linked("C001", "C002"));
        assert!(graph.is_linked("C002", "C001"));
        assert!(!graph.is_linked("C001", "C003"));
        assert!(graph.neighbors("C003").is_empty());
        assert_eq!(graph.linked_count(), 2);
    }
}
