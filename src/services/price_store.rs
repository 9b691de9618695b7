//! Storage seam for price series and the exclusion list
//!
//! [`FilePriceStore`] serves the flat-file layout on disk,
//! [`MemoryPriceStore`] keeps everything in memory for tests and tooling.

use crate::error::{AppError, Result};
use crate::models::{ExclusionList, PriceSeries};
use crate::services::csv_parser::{list_symbol_files, price_file_name, read_price_records, symbol_from_file_name};
use crate::services::exclusion_store::ExclusionStore;
use crate::utils::validate_symbol;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

pub trait PriceStore: Send + Sync {
    /// Symbols with a price series, sorted ascending
    fn list_symbols(&self) -> Result<Vec<String>>;

    /// Full series for `symbol`, in stored order
    fn read_series(&self, symbol: &str) -> Result<PriceSeries>;

    /// Current exclusion list, re-read on every call
    fn read_exclusions(&self) -> Result<ExclusionList>;

    /// Replace the exclusion list wholesale
    fn write_exclusions(&self, list: &ExclusionList) -> Result<()>;
}

pub type SharedPriceStore = Arc<dyn PriceStore>;

/// Price files under one directory plus a separate exclusion file
#[derive(Debug, Clone)]
pub struct FilePriceStore {
    data_dir: PathBuf,
    exclusions: ExclusionStore,
}

impl FilePriceStore {
    pub fn new(data_dir: impl Into<PathBuf>, not_supported_file: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            exclusions: ExclusionStore::new(not_supported_file),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn not_supported_file(&self) -> &Path {
        self.exclusions.path()
    }
}

impl PriceStore for FilePriceStore {
    /// Files whose symbol `read_series` would reject are skipped with a warning
    fn list_symbols(&self) -> Result<Vec<String>> {
        Ok(list_symbol_files(&self.data_dir)?
            .iter()
            .filter_map(|name| symbol_from_file_name(name))
            .filter(|symbol| match validate_symbol(symbol) {
                Ok(()) => true,
                Err(e) => {
                    warn!(directory = %self.data_dir.display(), "Skipping price file: {}", e);
                    false
                }
            })
            .map(str::to_string)
            .collect())
    }

    fn read_series(&self, symbol: &str) -> Result<PriceSeries> {
        validate_symbol(symbol)?;
        let path = self.data_dir.join(price_file_name(symbol));
        read_price_records(&path, true)
    }

    fn read_exclusions(&self) -> Result<ExclusionList> {
        self.exclusions.read()
    }

    fn write_exclusions(&self, list: &ExclusionList) -> Result<()> {
        self.exclusions.write(list)
    }
}

/// In-memory store with the same contract as [`FilePriceStore`]
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    series: Mutex<BTreeMap<String, PriceSeries>>,
    exclusions: Mutex<ExclusionList>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for `symbol`
    pub fn insert_series(&self, symbol: &str, records: PriceSeries) {
        if let Ok(mut series) = self.series.lock() {
            series.insert(symbol.to_string(), records);
        }
    }

    pub fn with_series(self, symbol: &str, records: PriceSeries) -> Self {
        self.insert_series(symbol, records);
        self
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Io("in-memory store lock poisoned".to_string())
}

impl PriceStore for MemoryPriceStore {
    fn list_symbols(&self) -> Result<Vec<String>> {
        Ok(self.series.lock().map_err(poisoned)?.keys().cloned().collect())
    }

    fn read_series(&self, symbol: &str) -> Result<PriceSeries> {
        self.series
            .lock()
            .map_err(poisoned)?
            .get(symbol)
            .cloned()
            .ok_or_else(|| AppError::FileNotFound(price_file_name(symbol)))
    }

    fn read_exclusions(&self) -> Result<ExclusionList> {
        Ok(self.exclusions.lock().map_err(poisoned)?.clone())
    }

    fn write_exclusions(&self, list: &ExclusionList) -> Result<()> {
        *self.exclusions.lock().map_err(poisoned)? = ExclusionList::normalized(list.symbols());
        Ok(())
    }
}
