//! The flat card record.
//!
//! A `Card` is one printing of a card: it carries the fields shared by every
//! printing of its base card (name, effect, type, color, stats) merged with
//! the printing's own fields (id, rarity). All search, filtering and display
//! happens on these records.
//!
//! Field names on the wire match the source card data (`baseId`,
//! `cardIdPrefix`, `product_name`, `trait`, ...).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::StatValue;

/// Trait tags on a card. Most cards carry two or fewer.
pub type TraitList = SmallVec<[String; 4]>;

/// One printing of a card.
///
/// ## Example
///
/// ```
/// use rust_ccg_search::cards::{Card, StatValue};
///
/// let card = Card::new("S1/001", "C001", "S1")
///     .with_name("Alpha")
///     .with_level(StatValue::Sentinel)
///     .with_cost(2);
///
/// assert_eq!(card.level_or_zero(), Some(0));
/// assert_eq!(card.cost_or_zero(), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Full printing id, `<prefix>/<code>`.
    pub id: String,

    /// Base card this printing belongs to.
    pub base_id: String,

    /// Product file the card was loaded from.
    pub card_id_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,

    #[serde(rename = "product_name", default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<StatValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<StatValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<StatValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soul: Option<StatValue>,

    /// Number of soul trigger icons.
    #[serde(rename = "trigger_soul_count", default, skip_serializing_if = "Option::is_none")]
    pub trigger_soul_count: Option<i64>,

    #[serde(rename = "trait", default)]
    pub traits: TraitList,

    /// True for the canonical (shortest-id) printing of the base card.
    #[serde(default)]
    pub is_lowest_rarity: bool,

    /// Full ids of cards this card mentions or is mentioned by.
    #[serde(default)]
    pub link: Vec<String>,

    /// Card image location (display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    /// Flavor text (display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
}

impl Card {
    /// Create a card with only its identity fields set.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        base_id: impl Into<String>,
        card_id_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_id: base_id.into(),
            card_id_prefix: card_id_prefix.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product_name = Some(product.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<StatValue>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: impl Into<StatValue>) -> Self {
        self.cost = Some(cost.into());
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: impl Into<StatValue>) -> Self {
        self.power = Some(power.into());
        self
    }

    #[must_use]
    pub fn with_soul(mut self, soul: impl Into<StatValue>) -> Self {
        self.soul = Some(soul.into());
        self
    }

    #[must_use]
    pub fn with_trigger_soul(mut self, count: i64) -> Self {
        self.trigger_soul_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_trait(mut self, tag: impl Into<String>) -> Self {
        self.traits.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_lowest_rarity(mut self, lowest: bool) -> Self {
        self.is_lowest_rarity = lowest;
        self
    }

    /// Name, or empty text when absent.
    #[must_use]
    pub fn name_text(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Effect text, or empty text when absent.
    #[must_use]
    pub fn effect_text(&self) -> &str {
        self.effect.as_deref().unwrap_or("")
    }

    /// Level with the sentinel mapped to zero. `None` if the card has no level.
    #[must_use]
    pub fn level_or_zero(&self) -> Option<i64> {
        self.level.map(StatValue::or_zero)
    }

    /// Cost with the sentinel mapped to zero. `None` if the card has no cost.
    #[must_use]
    pub fn cost_or_zero(&self) -> Option<i64> {
        self.cost.map(StatValue::or_zero)
    }

    /// Soul with the sentinel mapped to zero. `None` if the card has no soul.
    #[must_use]
    pub fn soul_or_zero(&self) -> Option<i64> {
        self.soul.map(StatValue::or_zero)
    }

    /// Raw numeric power. The sentinel is not coerced and yields `None`.
    #[must_use]
    pub fn power_number(&self) -> Option<i64> {
        self.power.and_then(StatValue::as_number)
    }

    /// Check for a trait tag.
    #[must_use]
    pub fn has_trait(&self, tag: &str) -> bool {
        self.traits.iter().any(|t| t == tag)
    }
}
