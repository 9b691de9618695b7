use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// A symbol ranked by its normalized range, `(max - min) / min`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSymbol {
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub normalized_range: Decimal,
}

impl NormalizedSymbol {
    pub fn new(name: String, normalized_range: Decimal) -> Self {
        Self {
            name,
            normalized_range,
        }
    }

    /// Ranking order: highest range first, then symbol name ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .normalized_range
            .cmp(&self.normalized_range)
            .then_with(|| self.name.cmp(&other.name))
    }
}
