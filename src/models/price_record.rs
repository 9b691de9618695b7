use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single price observation read from a symbol file
///
/// The `symbol` column is informational; the file name decides which
/// symbol a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRecord {
    /// Observation time, millisecond precision
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Symbol as written in the row
    pub symbol: String,

    /// Observed price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl PriceRecord {
    pub fn new(timestamp: DateTime<Utc>, symbol: String, price: Decimal) -> Self {
        Self {
            timestamp,
            symbol,
            price,
        }
    }

    /// Calendar date of the observation in the given reporting zone
    pub fn date_in(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }
}
