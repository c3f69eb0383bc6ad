//! Numeric card stats with the "-" sentinel.
//!
//! Card data stores level, cost, power and soul either as numbers or as the
//! literal string `"-"` ("not applicable"). The sentinel is not an error:
//! filters treat it as zero for level, cost and soul.
//!
//! ## Accepted JSON forms
//!
//! - `3` or `3.0`: `Number(3)`
//! - `"3"`: `Number(3)` (numeric strings appear in some product files)
//! - `"-"`: `Sentinel`

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// The literal used by card data for "no value".
pub const SENTINEL: &str = "-";

/// A numeric card stat, or the "no value" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatValue {
    /// A concrete number.
    Number(i64),
    /// The `"-"` sentinel.
    Sentinel,
}

impl StatValue {
    /// Get the number if this is not the sentinel.
    #[must_use]
    pub fn as_number(self) -> Option<i64> {
        match self {
            StatValue::Number(v) => Some(v),
            StatValue::Sentinel => None,
        }
    }

    /// Numeric value with the sentinel mapped to zero.
    #[must_use]
    pub fn or_zero(self) -> i64 {
        self.as_number().unwrap_or(0)
    }

    /// Check if this is the sentinel.
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        matches!(self, StatValue::Sentinel)
    }

    /// Parse the textual form used in card data and filter selections.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed == SENTINEL {
            return Some(StatValue::Sentinel);
        }
        trimmed.parse::<i64>().ok().map(StatValue::Number)
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Number(v)
    }
}

impl From<i32> for StatValue {
    fn from(v: i32) -> Self {
        StatValue::Number(v as i64)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(v) => write!(f, "{}", v),
            StatValue::Sentinel => f.write_str(SENTINEL),
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Number(v) => serializer.serialize_i64(*v),
            StatValue::Sentinel => serializer.serialize_str(SENTINEL),
        }
    }
}

struct StatValueVisitor;

impl<'de> Visitor<'de> for StatValueVisitor {
    type Value = StatValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, a numeric string or \"-\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatValue, E> {
        Ok(StatValue::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatValue, E> {
        i64::try_from(v)
            .map(StatValue::Number)
            .map_err(|_| E::custom(format!("stat value {} out of range", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StatValue, E> {
        // 2^63; `i64::MAX as f64` rounds up to it.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if !v.is_finite() || v.fract() != 0.0 {
            return Err(E::custom(format!("stat value {} is not an integer", v)));
        }
        if !(-LIMIT..LIMIT).contains(&v) {
            return Err(E::custom(format!("stat value {} out of range", v)));
        }
        Ok(StatValue::Number(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StatValue, E> {
        StatValue::parse(v).ok_or_else(|| E::custom(format!("invalid stat value '{}'", v)))
    }
}

impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatValueVisitor)
    }
}
