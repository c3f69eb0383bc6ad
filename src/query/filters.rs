//! Attribute filters applied after the keyword phase.
//!
//! Every selection is optional. An empty list, `None` or `false` leaves
//! the corresponding attribute unconstrained, so `FilterSet::default()`
//! matches every card. Active predicates are AND'd.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, StatValue};
use crate::normalize::FilterOptions;

/// Keywords shorter than this never count as an active filter.
pub const MIN_KEYWORD_CHARS: usize = 2;

/// User-selected attribute filters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub selected_card_types: Vec<String>,
    pub selected_colors: Vec<String>,
    pub selected_product_name: Option<String>,
    /// Every selected trait must be present on the card.
    pub selected_traits: Vec<String>,
    pub selected_levels: Vec<StatValue>,
    pub selected_rarities: Vec<String>,
    /// Keep only the lowest-rarity printing of each card.
    pub show_unique_cards: bool,
    /// Inclusive `(min, max)` cost bounds.
    pub selected_cost_range: Option<(i64, i64)>,
    /// Inclusive `(min, max)` power bounds.
    pub selected_power_range: Option<(i64, i64)>,
    /// Keep only cards with at least one trigger soul icon.
    pub show_trigger_soul: bool,
    pub selected_soul: Vec<StatValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.selected_card_types.push(card_type.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.selected_colors.push(color.into());
        self
    }

    pub fn with_product_name(mut self, product: impl Into<String>) -> Self {
        self.selected_product_name = Some(product.into());
        self
    }

    pub fn with_trait(mut self, tag: impl Into<String>) -> Self {
        self.selected_traits.push(tag.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<StatValue>) -> Self {
        self.selected_levels.push(level.into());
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.selected_rarities.push(rarity.into());
        self
    }

    pub fn with_unique_cards(mut self, enabled: bool) -> Self {
        self.show_unique_cards = enabled;
        self
    }

    pub fn with_cost_range(mut self, min: i64, max: i64) -> Self {
        self.selected_cost_range = Some((min, max));
        self
    }

    pub fn with_power_range(mut self, min: i64, max: i64) -> Self {
        self.selected_power_range = Some((min, max));
        self
    }

    pub fn with_trigger_soul(mut self, enabled: bool) -> Self {
        self.show_trigger_soul = enabled;
        self
    }

    pub fn with_soul(mut self, soul: impl Into<StatValue>) -> Self {
        self.selected_soul.push(soul.into());
        self
    }

    /// Check if a single card passes every active predicate.
    ///
    /// For many cards prefer `compile`, which maps level and soul
    /// selections once.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        self.compile().matches(card)
    }

    /// Prepare the filter for repeated evaluation.
    #[must_use]
    pub fn compile(&self) -> CompiledFilter<'_> {
        CompiledFilter {
            filters: self,
            levels: stat_set(&self.selected_levels),
            souls: stat_set(&self.selected_soul),
        }
    }

    /// Check if the keyword or any selection narrows the catalog.
    ///
    /// Ranges count as active only when they differ from the catalog's full
    /// range. The unique-art, trigger-soul and soul selections are display
    /// toggles and do not count.
    #[must_use]
    pub fn is_active(&self, options: &FilterOptions, keyword: Option<&str>) -> bool {
        let range_narrowed = |selected: Option<(i64, i64)>, full: (i64, i64)| {
            selected.map_or(false, |range| range != full)
        };

        keyword.map_or(false, |k| k.chars().count() >= MIN_KEYWORD_CHARS)
            || !self.selected_card_types.is_empty()
            || !self.selected_colors.is_empty()
            || self.product_name().is_some()
            || !self.selected_traits.is_empty()
            || !self.selected_levels.is_empty()
            || !self.selected_rarities.is_empty()
            || range_narrowed(self.selected_cost_range, options.cost_range.bounds())
            || range_narrowed(self.selected_power_range, options.power_range.bounds())
    }

    fn product_name(&self) -> Option<&str> {
        self.selected_product_name
            .as_deref()
            .filter(|p| !p.is_empty())
    }
}

/// Sentinel selections map to zero, like the card side.
fn stat_set(values: &[StatValue]) -> Option<FxHashSet<i64>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().map(|v| v.or_zero()).collect())
    }
}

/// A `FilterSet` with its set-valued selections prepared.
#[derive(Debug)]
pub struct CompiledFilter<'a> {
    filters: &'a FilterSet,
    levels: Option<FxHashSet<i64>>,
    souls: Option<FxHashSet<i64>>,
}

impl CompiledFilter<'_> {
    /// Check if `card` passes every active predicate.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        let f = self.filters;

        if f.show_unique_cards && !card.is_lowest_rarity {
            return false;
        }
        if !f.selected_card_types.is_empty() && !contains(&f.selected_card_types, &card.card_type)
        {
            return false;
        }
        if !f.selected_colors.is_empty() && !contains(&f.selected_colors, &card.color) {
            return false;
        }
        if let Some(product) = f.product_name() {
            if card.product_name.as_deref() != Some(product) {
                return false;
            }
        }
        if !f.selected_traits.iter().all(|t| card.has_trait(t)) {
            return false;
        }
        if let Some(levels) = &self.levels {
            if !card.level_or_zero().map_or(false, |l| levels.contains(&l)) {
                return false;
            }
        }
        if !f.selected_rarities.is_empty() && !contains(&f.selected_rarities, &card.rarity) {
            return false;
        }
        // Cards without a comparable cost or power are never range-excluded.
        if let (Some((min, max)), Some(cost)) = (f.selected_cost_range, card.cost_or_zero()) {
            if cost < min || cost > max {
                return false;
            }
        }
        if let (Some((min, max)), Some(power)) = (f.selected_power_range, card.power_number()) {
            if power < min || power > max {
                return false;
            }
        }
        if f.show_trigger_soul && card.trigger_soul_count.unwrap_or(0) < 1 {
            return false;
        }
        if let Some(souls) = &self.souls {
            if !card.soul_or_zero().map_or(false, |s| souls.contains(&s)) {
                return false;
            }
        }
        true
    }
}

fn contains(selected: &[String], value: &Option<String>) -> bool {
    value
        .as_deref()
        .map_or(false, |v| selected.iter().any(|s| s == v))
}
