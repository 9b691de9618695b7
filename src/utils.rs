use crate::constants::{
    DEFAULT_NOT_SUPPORTED_FILE, DEFAULT_PORT, DEFAULT_REPORTING_TZ, DEFAULT_STATISTIC_DIR,
};
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::PathBuf;

/// Get price data directory from environment variable or use default
pub fn get_statistic_dir() -> PathBuf {
    std::env::var("STATISTIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATISTIC_DIR))
}

/// Get exclusion list path from environment variable or use default
pub fn get_not_supported_file() -> PathBuf {
    std::env::var("NOT_SUPPORTED_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_NOT_SUPPORTED_FILE))
}

/// Get reporting time zone name from environment variable or use default
pub fn get_reporting_tz_name() -> String {
    std::env::var("REPORTING_TZ").unwrap_or_else(|_| DEFAULT_REPORTING_TZ.to_string())
}

/// Get HTTP port from environment variable or use default
pub fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Parse an IANA time zone name ("UTC", "Europe/Sofia", ...)
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| AppError::Config(format!("Invalid time zone '{}': {}", name, e)))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in the given zone
pub fn format_timestamp(time: &DateTime<Utc>, tz: &Tz) -> String {
    time.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Check that a symbol is safe to embed in a file name
pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(AppError::InvalidInput("Symbol must not be empty".to_string()));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid symbol '{}'. Only letters, digits, '-' and '_' are allowed",
            symbol
        )));
    }
    Ok(())
}
