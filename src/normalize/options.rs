//! Filter option tables derived from the catalog.
//!
//! While cards are flattened, the distinct values a user can filter on are
//! collected: product names, traits, rarities, soul values and the numeric
//! cost/power ranges.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::query::FilterSet;

/// Inclusive numeric range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: i64,
    pub max: i64,
}

impl StatRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// The range as a `(min, max)` pair.
    #[must_use]
    pub fn bounds(self) -> (i64, i64) {
        (self.min, self.max)
    }

    fn widen(range: &mut Option<StatRange>, value: i64) {
        match range {
            Some(r) => {
                r.min = r.min.min(value);
                r.max = r.max.max(value);
            }
            None => *range = Some(StatRange::new(value, value)),
        }
    }
}

/// Distinct filterable values of a catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Product names in first-seen order.
    pub product_names: Vec<String>,

    /// Trait tags in first-seen order.
    pub traits: Vec<String>,

    /// Rarities, sorted.
    pub rarities: Vec<String>,

    /// Soul values with the sentinel mapped to zero, ascending.
    #[serde(default)]
    pub souls: Vec<i64>,

    /// Range of numeric costs; `0..0` when no card has one.
    pub cost_range: StatRange,

    /// Range of numeric powers; `0..0` when no card has one.
    pub power_range: StatRange,
}

impl FilterOptions {
    /// The filter set a UI resets to: nothing selected, ranges spanning the
    /// whole catalog.
    #[must_use]
    pub fn default_filters(&self) -> FilterSet {
        FilterSet::default()
            .with_cost_range(self.cost_range.min, self.cost_range.max)
            .with_power_range(self.power_range.min, self.power_range.max)
    }
}

/// Collects filter options card by card.
#[derive(Debug, Default)]
pub struct OptionsAccumulator {
    product_names: Vec<String>,
    seen_products: FxHashSet<String>,
    traits: Vec<String>,
    seen_traits: FxHashSet<String>,
    rarities: BTreeSet<String>,
    souls: BTreeSet<i64>,
    cost: Option<StatRange>,
    power: Option<StatRange>,
}

impl OptionsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one card's filterable values.
    pub fn observe(&mut self, card: &Card) {
        if let Some(product) = card.product_name.as_ref().filter(|p| !p.is_empty()) {
            if self.seen_products.insert(product.clone()) {
                self.product_names.push(product.clone());
            }
        }

        for tag in &card.traits {
            if self.seen_traits.insert(tag.clone()) {
                self.traits.push(tag.clone());
            }
        }

        if let Some(rarity) = card.rarity.as_ref().filter(|r| !r.is_empty()) {
            self.rarities.insert(rarity.clone());
        }

        if let Some(soul) = card.soul_or_zero() {
            self.souls.insert(soul);
        }

        // Sentinel costs and powers do not widen the ranges.
        if let Some(cost) = card.cost.and_then(|c| c.as_number()) {
            StatRange::widen(&mut self.cost, cost);
        }
        if let Some(power) = card.power_number() {
            StatRange::widen(&mut self.power, power);
        }
    }

    /// Finish collection.
    #[must_use]
    pub fn finish(self) -> FilterOptions {
        FilterOptions {
            product_names: self.product_names,
            traits: self.traits,
            rarities: self.rarities.into_iter().collect(),
            souls: self.souls.into_iter().collect(),
            cost_range: self.cost.unwrap_or_default(),
            power_range: self.power.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::StatValue;

    #[test]
    fn test_empty_options() {
        let options = OptionsAccumulator::new().finish();
        assert!(options.product_names.is_empty());
        assert_eq!(options.cost_range, StatRange::new(0, 0));
        assert_eq!(options.power_range, StatRange::new(0, 0));
    }

    #[test]
    fn test_accumulate() {
        let mut acc = OptionsAccumulator::new();
        acc.observe(
            &Card::new("S1/001", "C001", "S1")
                .with_product("Booster B")
                .with_trait("Music")
                .with_rarity("RR")
                .with_cost(2)
                .with_power(3000)
                .with_soul(StatValue::Sentinel),
        );
        acc.observe(
            &Card::new("S1/002", "C002", "S1")
                .with_product("Booster A")
                .with_trait("Idol")
                .with_trait("Music")
                .with_rarity("C")
                .with_cost(StatValue::Sentinel)
                .with_power(500)
                .with_soul(2),
        );
        acc.observe(&Card::new("S1/003", "C003", "S1").with_product("Booster B"));

        let options = acc.finish();
        assert_eq!(options.product_names, vec!["Booster B", "Booster A"]);
        assert_eq!(options.traits, vec!["Music", "Idol"]);
        assert_eq!(options.rarities, vec!["C", "RR"]);
        assert_eq!(options.souls, vec![0, 2]);
        assert_eq!(options.cost_range, StatRange::new(2, 2));
        assert_eq!(options.power_range, StatRange::new(500, 3000));
    }

    #[test]
    fn test_default_filters_span_catalog() {
        let options = FilterOptions {
            cost_range: StatRange::new(0, 3),
            power_range: StatRange::new(500, 9000),
            ..FilterOptions::default()
        };
        let filters = options.default_filters();
        assert_eq!(filters.selected_cost_range, Some((0, 3)));
        assert_eq!(filters.selected_power_range, Some((500, 9000)));
        assert!(filters.selected_traits.is_empty());
        assert!(!filters.is_active(&options, None));
    }

    #[test]
    fn test_options_serialization() {
        let options = FilterOptions {
            product_names: vec!["Booster".into()],
            ..FilterOptions::default()
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["productNames"][0], "Booster");
        assert_eq!(json["costRange"]["min"], 0);
    }
}
