mod exclusion_list;
mod normalized_symbol;
mod price_record;
mod symbol_statistic;

pub use exclusion_list::{ExclusionList, NotSupportedCryptos};
pub use normalized_symbol::NormalizedSymbol;
pub use price_record::PriceRecord;
pub use symbol_statistic::SymbolStatistic;

/// Time series for a single symbol, in file order
pub type PriceSeries = Vec<PriceRecord>;
