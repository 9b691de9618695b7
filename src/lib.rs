//! Price statistics for cryptocurrency series stored as CSV files.
//!
//! Each symbol has a `<SYMBOL>_values.csv` file; a separate one-line file
//! lists symbols that are not supported. The HTTP API ranks symbols by
//! normalized range and reports oldest/newest/min/max prices.

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
