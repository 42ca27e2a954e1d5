//! Unified error types for gridcast.
//!
//! The parse path itself never fails for a well-formed grid: structural
//! problems accumulate as diagnostic strings on the parse result instead.
//! `Error` covers the caller-level surface, chiefly grid construction with
//! malformed merge metadata.
use thiserror::Error;

/// Main error type for gridcast operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A merge rectangle is inverted (end before start)
    #[error(
        "invalid merge range: rows {start_row}..={end_row}, columns {start_col}..={end_col}"
    )]
    InvalidMerge {
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for gridcast operations.
pub type Result<T> = std::result::Result<T, Error>;
