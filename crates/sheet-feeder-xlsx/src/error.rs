//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] sheet_feeder_core::Error),
}

impl From<XlsxError> for sheet_feeder_core::Error {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::Core(e) => e,
            XlsxError::Io(e) => sheet_feeder_core::Error::Io(e),
            other => sheet_feeder_core::Error::read(other.to_string()),
        }
    }
}
