//! Query orchestration
//!
//! Each call re-reads the exclusion list and the needed price series from
//! the store; nothing is cached between calls.

use crate::error::{AppError, Result};
use crate::models::{ExclusionList, NormalizedSymbol, PriceRecord, SymbolStatistic};
use crate::services::aggregator::Aggregator;
use crate::services::price_store::SharedPriceStore;
use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CryptoService {
    store: SharedPriceStore,
    timezone: Tz,
}

impl CryptoService {
    /// `timezone` pins which calendar day a timestamp belongs to
    pub fn new(store: SharedPriceStore, timezone: Tz) -> Self {
        Self { store, timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Symbols with data that are not on the exclusion list, sorted
    pub fn supported_symbols(&self) -> Result<Vec<String>> {
        let exclusions = self.store.read_exclusions()?;
        let symbols: Vec<String> = self
            .store
            .list_symbols()?
            .into_iter()
            .filter(|symbol| !exclusions.contains(symbol))
            .collect();

        debug!(
            supported = symbols.len(),
            excluded = exclusions.len(),
            "Resolved supported symbols"
        );
        Ok(symbols)
    }

    /// Every supported symbol ranked by normalized range over its full history
    ///
    /// Highest range first; equal ranges are ordered by symbol. Symbols
    /// without records are left out.
    pub fn list_normalized_symbols(&self) -> Result<Vec<NormalizedSymbol>> {
        let mut ranked = Vec::new();
        for symbol in self.supported_symbols()? {
            let records = self.store.read_series(&symbol)?;
            if let Some(normalized) = Aggregator::normalize(&symbol, &records)? {
                ranked.push(normalized);
            }
        }

        ranked.sort_by(NormalizedSymbol::rank_cmp);
        info!(count = ranked.len(), "Ranked symbols by normalized range");
        Ok(ranked)
    }

    /// Supported symbol with the highest normalized range on `date`
    ///
    /// Only records whose timestamp falls on `date` in the reporting zone
    /// count. Symbols with no records that day are skipped; if none remain
    /// the result is [`AppError::EmptyResultSet`].
    pub fn max_normalized_symbol_for_date(&self, date: NaiveDate) -> Result<NormalizedSymbol> {
        let mut best: Option<NormalizedSymbol> = None;

        for symbol in self.supported_symbols()? {
            let day: Vec<PriceRecord> = self
                .store
                .read_series(&symbol)?
                .into_iter()
                .filter(|r| r.date_in(&self.timezone) == date)
                .collect();

            let Some(candidate) = Aggregator::normalize(&symbol, &day)? else {
                continue;
            };

            best = match best {
                Some(current) if current.rank_cmp(&candidate).is_le() => Some(current),
                _ => Some(candidate),
            };
        }

        best.ok_or_else(|| {
            AppError::EmptyResultSet(format!(
                "no supported crypto has prices on {} ({})",
                date, self.timezone
            ))
        })
    }

    /// Oldest/newest/min/max for one symbol
    ///
    /// The symbol is uppercased before the exclusion check and the file
    /// lookup, so `btc` and `BTC` behave the same.
    pub fn statistic_for_symbol(&self, symbol: &str) -> Result<SymbolStatistic> {
        let symbol = symbol.trim().to_uppercase();

        let exclusions = self.store.read_exclusions()?;
        if exclusions.contains(&symbol) {
            return Err(AppError::UnsupportedSymbol(symbol));
        }

        let records = self.store.read_series(&symbol)?;
        Ok(Aggregator::summarize(&symbol, &records))
    }

    /// Statistics for every supported symbol, ordered by symbol
    pub fn all_statistics(&self) -> Result<Vec<SymbolStatistic>> {
        self.supported_symbols()?
            .iter()
            .map(|symbol| {
                let records = self.store.read_series(symbol)?;
                Ok(Aggregator::summarize(symbol, &records))
            })
            .collect()
    }

    /// Current exclusion list, as stored
    pub fn list_excluded_symbols(&self) -> Result<Vec<String>> {
        Ok(self.store.read_exclusions()?.into_symbols())
    }

    /// Replace the exclusion list with `symbols`
    ///
    /// Not additive: symbols missing from `symbols` become supported again.
    pub fn add_excluded_symbols(&self, symbols: Vec<String>) -> Result<()> {
        let list = ExclusionList::normalized(symbols);
        self.store.write_exclusions(&list)
    }
}
