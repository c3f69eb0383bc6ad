//! Raw per-product card documents and the typed field merge.
//!
//! A product file maps base ids to base-card objects:
//!
//! ```json
//! {
//!   "C001": {
//!     "name": "Alpha", "effect": "...", "level": 1, "cost": "-",
//!     "all_cards": [ { "id": "S1/001", "rarity": "R" } ]
//!   }
//! }
//! ```
//!
//! Base and printing objects are read into `CardFields`, a fixed field list.
//! Fields outside that list are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cards::{Card, StatValue, TraitList};
use crate::core::{CatalogError, Result};

/// Key of the per-printing list inside a base-card object.
pub const PRINTINGS_KEY: &str = "all_cards";

/// One product file's parsed JSON plus the prefix it was loaded under.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFile {
    pub content: Value,
    pub card_id_prefix: String,
}

impl RawFile {
    pub fn new(card_id_prefix: impl Into<String>, content: Value) -> Self {
        Self {
            content,
            card_id_prefix: card_id_prefix.into(),
        }
    }
}

/// Card fields that may appear on a base card, a printing, or both.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CardFields {
    pub name: Option<String>,
    pub effect: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub color: Option<String>,
    pub rarity: Option<String>,
    pub product_name: Option<String>,
    pub level: Option<StatValue>,
    pub cost: Option<StatValue>,
    pub power: Option<StatValue>,
    pub soul: Option<StatValue>,
    pub trigger_soul_count: Option<i64>,
    #[serde(rename = "trait")]
    pub traits: Option<Vec<String>>,
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
    pub flavor: Option<String>,
}

impl CardFields {
    /// Merge a printing's fields over its base card's fields.
    ///
    /// Each field of `variant` that is present wins; absent fields fall back
    /// to `base`.
    #[must_use]
    pub fn merge(base: &CardFields, variant: CardFields) -> CardFields {
        CardFields {
            name: variant.name.or_else(|| base.name.clone()),
            effect: variant.effect.or_else(|| base.effect.clone()),
            card_type: variant.card_type.or_else(|| base.card_type.clone()),
            color: variant.color.or_else(|| base.color.clone()),
            rarity: variant.rarity.or_else(|| base.rarity.clone()),
            product_name: variant.product_name.or_else(|| base.product_name.clone()),
            level: variant.level.or(base.level),
            cost: variant.cost.or(base.cost),
            power: variant.power.or(base.power),
            soul: variant.soul.or(base.soul),
            trigger_soul_count: variant.trigger_soul_count.or(base.trigger_soul_count),
            traits: variant.traits.or_else(|| base.traits.clone()),
            img_url: variant.img_url.or_else(|| base.img_url.clone()),
            flavor: variant.flavor.or_else(|| base.flavor.clone()),
        }
    }

    /// Build a card record from merged fields.
    #[must_use]
    pub fn into_card(self, id: String, base_id: &str, prefix: &str, is_lowest_rarity: bool) -> Card {
        Card {
            id,
            base_id: base_id.to_string(),
            card_id_prefix: prefix.to_string(),
            name: self.name,
            effect: self.effect,
            card_type: self.card_type,
            color: self.color,
            rarity: self.rarity,
            product_name: self.product_name,
            level: self.level,
            cost: self.cost,
            power: self.power,
            soul: self.soul,
            trigger_soul_count: self.trigger_soul_count,
            traits: self.traits.map(TraitList::from_vec).unwrap_or_default(),
            is_lowest_rarity,
            link: Vec::new(),
            img_url: self.img_url,
            flavor: self.flavor,
        }
    }
}

/// A base card split into its shared fields and its printings.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBaseCard {
    pub fields: CardFields,
    pub printings: Vec<RawPrinting>,
}

/// One printing of a base card.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPrinting {
    pub id: String,
    pub fields: CardFields,
}

impl RawBaseCard {
    /// Parse one base-card entry of a product file.
    pub fn parse(prefix: &str, base_id: &str, value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(CatalogError::shape(prefix, base_id, "base card is not an object"));
        };

        let raw_printings = match object.remove(PRINTINGS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(CatalogError::shape(prefix, base_id, "all_cards is not a list"));
            }
        };

        let fields = parse_fields(prefix, base_id, object)?;

        let printings = raw_printings
            .into_iter()
            .enumerate()
            .map(|(i, item)| RawPrinting::parse(prefix, base_id, i, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields, printings })
    }
}

impl RawPrinting {
    fn parse(prefix: &str, base_id: &str, index: usize, value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(CatalogError::shape(
                prefix,
                base_id,
                format!("printing #{} is not an object", index),
            ));
        };

        let id = match object.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => id,
            _ => {
                return Err(CatalogError::shape(
                    prefix,
                    base_id,
                    format!("printing #{} has no string id", index),
                ));
            }
        };

        let fields = parse_fields(prefix, base_id, object)
            .map_err(|e| annotate(e, &format!("printing {}", id)))?;

        Ok(Self { id, fields })
    }
}

fn parse_fields(prefix: &str, base_id: &str, object: Map<String, Value>) -> Result<CardFields> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| CatalogError::shape(prefix, base_id, e.to_string()))
}

fn annotate(err: CatalogError, context: &str) -> CatalogError {
    match err {
        CatalogError::Shape {
            prefix,
            base_id,
            reason,
        } => CatalogError::Shape {
            prefix,
            base_id,
            reason: format!("{}: {}", context, reason),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_base_card() {
        let value = json!({
            "name": "Alpha",
            "level": "-",
            "trait": ["Music"],
            "imgUrl": "alpha.png",
            "unexpected": true,
            "all_cards": [{"id": "S1/001", "rarity": "R"}]
        });

        let base = RawBaseCard::parse("S1", "C001", value).unwrap();
        assert_eq!(base.fields.name.as_deref(), Some("Alpha"));
        assert_eq!(base.fields.level, Some(StatValue::Sentinel));
        assert_eq!(base.fields.img_url.as_deref(), Some("alpha.png"));
        assert_eq!(base.printings.len(), 1);
        assert_eq!(base.printings[0].id, "S1/001");
        assert_eq!(base.printings[0].fields.rarity.as_deref(), Some("R"));
    }

    #[test]
    fn test_missing_printings_is_empty() {
        let base = RawBaseCard::parse("S1", "C001", json!({"name": "Alpha"})).unwrap();
        assert!(base.printings.is_empty());
    }

    #[test]
    fn test_shape_errors() {
        let not_object = RawBaseCard::parse("S1", "C001", json!("Alpha"));
        assert!(matches!(not_object, Err(CatalogError::Shape { .. })));

        let not_list = RawBaseCard::parse("S1", "C001", json!({"all_cards": {}}));
        assert!(matches!(not_list, Err(CatalogError::Shape { .. })));

        let no_id = RawBaseCard::parse("S1", "C001", json!({"all_cards": [{"rarity": "R"}]}));
        let err = no_id.unwrap_err().to_string();
        assert!(err.contains("no string id"));

        let bad_stat = RawBaseCard::parse("S1", "C001", json!({"cost": "lots", "all_cards": []}));
        assert!(matches!(bad_stat, Err(CatalogError::Shape { .. })));
    }

    #[test]
    fn test_bad_printing_field_names_printing() {
        let result = RawBaseCard::parse(
            "S1",
            "C001",
            json!({"all_cards": [{"id": "S1/001", "power": "strong"}]}),
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("printing S1/001"));
    }

    #[test]
    fn test_merge_variant_overrides_base() {
        let base = CardFields {
            name: Some("Alpha".into()),
            rarity: Some("C".into()),
            power: Some(StatValue::Number(1000)),
            ..CardFields::default()
        };
        let variant = CardFields {
            rarity: Some("SP".into()),
            img_url: Some("alpha_sp.png".into()),
            ..CardFields::default()
        };

        let merged = CardFields::merge(&base, variant);
        assert_eq!(merged.name.as_deref(), Some("Alpha"));
        assert_eq!(merged.rarity.as_deref(), Some("SP"));
        assert_eq!(merged.power, Some(StatValue::Number(1000)));
        assert_eq!(merged.img_url.as_deref(), Some("alpha_sp.png"));
    }

    #[test]
    fn test_into_card() {
        let fields = CardFields {
            name: Some("Alpha".into()),
            traits: Some(vec!["Music".into(), "Idol".into()]),
            ..CardFields::default()
        };
        let card = fields.into_card("S1/001".into(), "C001", "S1", true);
        assert_eq!(card.base_id, "C001");
        assert_eq!(card.card_id_prefix, "S1");
        assert!(card.is_lowest_rarity);
        assert_eq!(card.traits.len(), 2);
        assert!(card.link.is_empty());
    }
}
