use crate::constants::NORMALIZED_RANGE_PRECISION;
use crate::error::{AppError, Result};
use crate::models::{NormalizedSymbol, PriceRecord, SymbolStatistic};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Reductions over a price series
///
/// Every reduction returns `None` for an empty series; callers pick the
/// default that fits their response.
pub struct Aggregator;

impl Aggregator {
    /// Lowest price in the series
    pub fn min_price(records: &[PriceRecord]) -> Option<Decimal> {
        records.iter().map(|r| r.price).min()
    }

    /// Highest price in the series
    pub fn max_price(records: &[PriceRecord]) -> Option<Decimal> {
        records.iter().map(|r| r.price).max()
    }

    /// Price of the earliest record
    ///
    /// On equal timestamps the record appearing first in the file wins.
    pub fn oldest_price(records: &[PriceRecord]) -> Option<Decimal> {
        records
            .iter()
            .reduce(|best, r| if r.timestamp < best.timestamp { r } else { best })
            .map(|r| r.price)
    }

    /// Price of the latest record
    ///
    /// On equal timestamps the record appearing first in the file wins.
    pub fn newest_price(records: &[PriceRecord]) -> Option<Decimal> {
        records
            .iter()
            .reduce(|best, r| if r.timestamp > best.timestamp { r } else { best })
            .map(|r| r.price)
    }

    /// `(max - min) / min` in a 16 significant digit, half-even context
    ///
    /// Both the difference and the quotient are rounded to the context.
    pub fn normalized_range(min: Decimal, max: Decimal) -> Result<Decimal> {
        if min.is_zero() {
            return Err(AppError::DivisionByZero(format!(
                "normalized range needs a non-zero minimum (max = {})",
                max
            )));
        }

        let spread = max
            .checked_sub(min)
            .map(Self::round_to_context)
            .ok_or_else(|| AppError::Overflow(format!("{} - {}", max, min)))?;

        let range = spread
            .checked_div(min)
            .map(Self::round_to_context)
            .ok_or_else(|| AppError::Overflow(format!("{} / {}", spread, min)))?;

        Ok(range.normalize())
    }

    /// Oldest/newest/min/max for one symbol
    ///
    /// An empty series yields zero for `min`/`max` and no oldest/newest.
    pub fn summarize(symbol: &str, records: &[PriceRecord]) -> SymbolStatistic {
        SymbolStatistic {
            name: symbol.to_uppercase(),
            oldest: Self::oldest_price(records),
            newest: Self::newest_price(records),
            min: Self::min_price(records).unwrap_or_default(),
            max: Self::max_price(records).unwrap_or_default(),
        }
    }

    /// Normalized range over the whole series, `None` when it is empty
    pub fn normalize(symbol: &str, records: &[PriceRecord]) -> Result<Option<NormalizedSymbol>> {
        let (Some(min), Some(max)) = (Self::min_price(records), Self::max_price(records)) else {
            debug!(symbol, "No records, skipping normalized range");
            return Ok(None);
        };

        let range = Self::normalized_range(min, max)
            .map_err(|e| match e {
                AppError::DivisionByZero(msg) => AppError::DivisionByZero(format!("{}: {}", symbol, msg)),
                other => other,
            })?;

        Ok(Some(NormalizedSymbol::new(symbol.to_string(), range)))
    }

    fn round_to_context(value: Decimal) -> Decimal {
        value
            .round_sf_with_strategy(NORMALIZED_RANGE_PRECISION, RoundingStrategy::MidpointNearestEven)
            .unwrap_or(value)
    }
}
