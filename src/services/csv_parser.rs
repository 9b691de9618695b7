//! Price file reader
//!
//! Locates `<SYMBOL>_values.csv` files and parses their rows into
//! [`PriceRecord`]s. Rows are split on every comma with no quoting, and a
//! malformed row (blank lines included) fails the whole file.

use crate::constants::{price_column, PRICE_CSV_MIN_COLUMNS, SEPARATOR, STATISTIC_FILE_SUFFIX};
use crate::error::{AppError, Result};
use crate::models::{PriceRecord, PriceSeries};
use chrono::DateTime;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// File name holding the price series of `symbol`
pub fn price_file_name(symbol: &str) -> String {
    format!("{}{}", symbol, STATISTIC_FILE_SUFFIX)
}

/// Symbol encoded in a price file name, `None` for unrelated files
pub fn symbol_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(STATISTIC_FILE_SUFFIX)
        .filter(|symbol| !symbol.is_empty())
}

/// List price file names directly under `directory`
///
/// Sub-directories and files without the `_values.csv` suffix are ignored.
/// The returned set iterates in name order.
pub fn list_symbol_files(directory: &Path) -> Result<BTreeSet<String>> {
    let entries = fs::read_dir(directory).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AppError::FileNotFound(format!("Price directory {}", directory.display()))
        }
        _ => AppError::Io(format!(
            "Failed to read price directory {}: {}",
            directory.display(),
            e
        )),
    })?;

    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::Io(format!("Failed to read entry: {}", e)))?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if symbol_from_file_name(&name).is_some() {
            names.insert(name);
        }
    }

    debug!(directory = %directory.display(), files = names.len(), "Listed price files");
    Ok(names)
}

/// Read all records from a price file
pub fn read_price_records(path: &Path, skip_header: bool) -> Result<PriceSeries> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::FileNotFound(path.display().to_string()),
        _ => AppError::Io(format!("Failed to open {}: {}", path.display(), e)),
    })?;

    let records = parse_price_records(file, &path.display().to_string(), skip_header)?;
    debug!(path = %path.display(), records = records.len(), "Read price file");
    Ok(records)
}

/// Parse price rows from any reader
///
/// `source` only labels error messages.
pub fn parse_price_records<R: Read>(reader: R, source: &str, skip_header: bool) -> Result<PriceSeries> {
    let mut records = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| {
            AppError::Io(format!("{} line {}: {}", source, index + 1, e))
        })?;
        if skip_header && index == 0 {
            continue;
        }

        let row: StringRecord = line.split(SEPARATOR).map(str::trim).collect();
        records.push(parse_price_row(&row, index + 1, source)?);
    }

    Ok(records)
}

/// Parse one `epochMillis,symbol,price` row; `line` is 1-based
fn parse_price_row(row: &StringRecord, line: usize, source: &str) -> Result<PriceRecord> {
    if row.len() < PRICE_CSV_MIN_COLUMNS {
        return Err(AppError::Parse(format!(
            "{} line {}: expected {} fields, found {}",
            source,
            line,
            PRICE_CSV_MIN_COLUMNS,
            row.len()
        )));
    }

    let raw_time = &row[price_column::TIMESTAMP];
    let millis: i64 = raw_time.parse().map_err(|_| {
        AppError::Parse(format!(
            "{} line {}: invalid timestamp '{}'",
            source, line, raw_time
        ))
    })?;
    let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        AppError::Parse(format!(
            "{} line {}: timestamp {} out of range",
            source, line, millis
        ))
    })?;

    let raw_price = &row[price_column::PRICE];
    let price = Decimal::from_str(raw_price)
        .or_else(|_| Decimal::from_scientific(raw_price))
        .map_err(|_| {
            AppError::Parse(format!(
                "{} line {}: invalid price '{}'",
                source, line, raw_price
            ))
        })?;

    Ok(PriceRecord::new(
        timestamp,
        row[price_column::SYMBOL].to_string(),
        price,
    ))
}
