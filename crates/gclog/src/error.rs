use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum GcLogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Record too long: {lines} lines (max: {max})")]
    RecordTooLong { lines: usize, max: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

// Convenience type alias
pub type Result<T> = std::result::Result<T, GcLogError>;
