//! Storage Format Constants
//!
//! Layout of the flat files the service reads and writes.
//!
//! ## Price series
//!
//! One file per symbol, `<SYMBOL>_values.csv`:
//!
//! ```text
//! timestamp,symbol,price
//! 1641009600000,BTC,46813.21
//! ```
//!
//! ## Exclusion list
//!
//! A single comma-joined line of uppercase symbols, or an empty file.

/// Suffix appended to a symbol to form its price file name
pub const STATISTIC_FILE_SUFFIX: &str = "_values.csv";

/// Field separator for both file kinds
pub const SEPARATOR: char = ',';

/// Minimum number of fields in a price row (timestamp, symbol, price)
pub const PRICE_CSV_MIN_COLUMNS: usize = 3;

/// Column indices for price rows (0-indexed)
pub mod price_column {
    pub const TIMESTAMP: usize = 0;
    pub const SYMBOL: usize = 1;
    pub const PRICE: usize = 2;
}

/// Default directory holding the per-symbol price files
pub const DEFAULT_STATISTIC_DIR: &str = "statistic";

/// Default exclusion list file name
pub const DEFAULT_NOT_SUPPORTED_FILE: &str = "not-supported-cryptos.csv";

/// Default time zone for calendar-day matching
pub const DEFAULT_REPORTING_TZ: &str = "UTC";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Significant digits kept by the normalized range arithmetic
///
/// Matches the IEEE 754 decimal64 context (16 digits, half-even rounding).
pub const NORMALIZED_RANGE_PRECISION: u32 = 16;
