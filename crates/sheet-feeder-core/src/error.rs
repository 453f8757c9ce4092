//! Error types for sheet-feeder-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving selectors or reading a sheet
#[derive(Debug, Error)]
pub enum Error {
    /// Column selector is empty or contains a non-letter token
    #[error("Invalid column selector: {0}")]
    InvalidSelector(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetIndexOutOfBounds(usize, usize),

    /// A selected column lies beyond the sheet's used width
    #[error("Column {column} out of range (sheet width: {width})")]
    ColumnOutOfRange { column: String, width: u32 },

    /// No reader handles this kind of file
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The underlying file could not be parsed
    #[error("Read error: {0}")]
    Read(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a read error with a message
    pub fn read<S: Into<String>>(msg: S) -> Self {
        Error::Read(msg.into())
    }

    /// Create a column-out-of-range error for a 0-based column index
    pub fn column_out_of_range(column: u32, width: u32) -> Self {
        Error::ColumnOutOfRange {
            column: crate::column_to_letters(column),
            width,
        }
    }
}
