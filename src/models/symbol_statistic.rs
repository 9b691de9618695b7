use rust_decimal::Decimal;
use serde::Serialize;

/// Oldest/newest/min/max prices for one symbol
///
/// `oldest` and `newest` are `None` when the symbol file has no rows;
/// `min` and `max` fall back to zero in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolStatistic {
    pub name: String,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub oldest: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub newest: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub max: Decimal,
}
