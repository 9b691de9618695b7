pub mod aggregator;
pub mod crypto_service;
pub mod csv_parser;
pub mod exclusion_store;
pub mod market_stats;
pub mod price_store;

pub use aggregator::Aggregator;
pub use crypto_service::CryptoService;
pub use exclusion_store::ExclusionStore;
pub use market_stats::{get_market_stats, MarketStats, SymbolInfo};
pub use price_store::{FilePriceStore, MemoryPriceStore, PriceStore, SharedPriceStore};
