use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported crypto: {0}")]
    UnsupportedSymbol(String),

    #[error("No data: {0}")]
    EmptyResultSet(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable name used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::FileNotFound(_) => "file_not_found",
            AppError::Parse(_) => "parse_error",
            AppError::UnsupportedSymbol(_) => "unsupported_symbol",
            AppError::EmptyResultSet(_) => "empty_result_set",
            AppError::DivisionByZero(_) => "division_by_zero",
            AppError::Overflow(_) => "overflow",
            AppError::Io(_) => "io_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Config(_) => "config_error",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;
