use crate::error::Result;
use crate::services::price_store::PriceStore;
use chrono::{DateTime, Utc};

/// Overview of what the store holds
#[derive(Debug, Clone)]
pub struct MarketStats {
    pub symbols: Vec<SymbolInfo>,
    pub excluded: Vec<String>,
}

impl MarketStats {
    pub fn has_data(&self) -> bool {
        !self.symbols.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.symbols.iter().map(|s| s.record_count).sum()
    }
}

/// Per-symbol record count and time span
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub symbol: String,
    pub record_count: usize,
    pub first_time: Option<DateTime<Utc>>,
    pub last_time: Option<DateTime<Utc>>,
    pub excluded: bool,
}

/// Collect record counts and time spans for every symbol in the store
pub fn get_market_stats(store: &dyn PriceStore) -> Result<MarketStats> {
    let exclusions = store.read_exclusions()?;

    let mut symbols = Vec::new();
    for symbol in store.list_symbols()? {
        let records = store.read_series(&symbol)?;
        symbols.push(SymbolInfo {
            excluded: exclusions.contains(&symbol),
            record_count: records.len(),
            first_time: records.iter().map(|r| r.timestamp).min(),
            last_time: records.iter().map(|r| r.timestamp).max(),
            symbol,
        });
    }

    Ok(MarketStats {
        symbols,
        excluded: exclusions.into_symbols(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExclusionList, PriceRecord};
    use crate::services::price_store::MemoryPriceStore;
    use rust_decimal_macros::dec;

    #[test]
    fn test_get_market_stats() {
        let t1 = DateTime::from_timestamp_millis(2_000).unwrap();
        let t2 = DateTime::from_timestamp_millis(1_000).unwrap();
        let store = MemoryPriceStore::new()
            .with_series(
                "BTC",
                vec![
                    PriceRecord::new(t1, "BTC".into(), dec!(1)),
                    PriceRecord::new(t2, "BTC".into(), dec!(2)),
                ],
            )
            .with_series("ETH", Vec::new());
        store
            .write_exclusions(&ExclusionList::normalized(["eth"]))
            .unwrap();

        let stats = get_market_stats(&store).unwrap();
        assert!(stats.has_data());
        assert_eq!(stats.total_records(), 2);
        assert_eq!(stats.excluded, vec!["ETH"]);

        let btc = &stats.symbols[0];
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.first_time, Some(t2));
        assert_eq!(btc.last_time, Some(t1));
        assert!(!btc.excluded);

        let eth = &stats.symbols[1];
        assert!(eth.excluded);
        assert_eq!(eth.first_time, None);
    }
}
