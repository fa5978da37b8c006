//! Core error types for the price drop checker.
//!
//! Only batch-fatal conditions live here. Anything that merely stops one
//! record's price from resolving is an outcome, not an error.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input as a whole is not an order export we can read.
    #[error("Invalid order export: {0}")]
    Format(#[from] FormatError),

    /// One data row could not be turned into a record.
    #[error("Invalid row {row}: {message}")]
    Row {
        /// 1-based index of the data row (the header is not counted)
        row: usize,
        message: String,
    },

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    pub(crate) fn row(row: usize, message: impl Into<String>) -> Self {
        Self::Row {
            row,
            message: message.into(),
        }
    }
}

/// Whole-input format failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("input is empty")]
    Empty,

    #[error("header row is missing")]
    MissingHeader,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("could not read CSV: {0}")]
    Malformed(String),
}
