//! Tick error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a tick without producing rows
///
/// These travel to the host as data (see
/// [`TickOutcome::host_result`](crate::TickOutcome::host_result)); they never
/// stop the workflow.
#[derive(Debug, Error)]
pub enum TickError {
    /// The file path is empty
    #[error("Invalid file path")]
    InvalidPath,

    /// The file path does not exist
    #[error("File not found: '{}'", .0.display())]
    FileNotFound(PathBuf),

    /// The path exists but is not a regular file
    #[error("Path '{}' is not a file", .0.display())]
    NotAFile(PathBuf),

    /// The column selector is empty or malformed
    #[error("Invalid column selector: {0}")]
    InvalidSelector(String),

    /// `read_count` is zero
    #[error("read_count must be at least 1")]
    InvalidReadCount,

    /// The spreadsheet could not be read
    #[error("Failed to read sheet: {0}")]
    SheetRead(#[source] sheet_feeder_core::Error),

    /// A panic caught at the tick boundary
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TickError {
    /// Whether this error comes from the configuration rather than the file
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TickError::InvalidPath
                | TickError::FileNotFound(_)
                | TickError::NotAFile(_)
                | TickError::InvalidSelector(_)
                | TickError::InvalidReadCount
        )
    }
}

impl From<sheet_feeder_core::Error> for TickError {
    fn from(err: sheet_feeder_core::Error) -> Self {
        match err {
            sheet_feeder_core::Error::InvalidSelector(msg) => TickError::InvalidSelector(msg),
            other => TickError::SheetRead(other),
        }
    }
}

/// Render an error with its chain of sources, outermost first
///
/// A source whose text is already part of the message is not repeated.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.contains(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(TickError::InvalidPath.is_config_error());
        assert!(TickError::InvalidSelector("x".into()).is_config_error());
        assert!(TickError::NotAFile(PathBuf::from("dir")).is_config_error());
        assert!(!TickError::SheetRead(sheet_feeder_core::Error::read("bad zip")).is_config_error());
        assert!(!TickError::Internal("boom".into()).is_config_error());
    }

    #[test]
    fn test_selector_errors_stay_config_errors() {
        let err: TickError = sheet_feeder_core::resolve_columns("1").unwrap_err().into();
        assert!(matches!(err, TickError::InvalidSelector(_)));

        let err: TickError = sheet_feeder_core::Error::SheetNotFound("Tags".into()).into();
        assert!(matches!(err, TickError::SheetRead(_)));
    }

    #[test]
    fn test_error_chain() {
        let err = TickError::SheetRead(sheet_feeder_core::Error::SheetNotFound("Tags".into()));
        assert_eq!(error_chain(&err), "Failed to read sheet: Sheet not found: Tags");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = TickError::SheetRead(sheet_feeder_core::Error::Io(io));
        assert_eq!(
            error_chain(&err),
            "Failed to read sheet: IO error: disk on fire"
        );
    }
}
