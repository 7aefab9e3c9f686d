//! Error types for wr-io.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record that parsed as CSV but does not describe a valid connector.
    /// `row` is 1-based, not counting the header.
    #[error("row {row}: {reason}")]
    Parse { row: usize, reason: String },
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
