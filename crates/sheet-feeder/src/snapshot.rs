//! Sheet snapshot: the cheap first read of a tick

use std::path::Path;

use sheet_feeder_core::{SheetId, SheetReader};

use crate::error::TickError;

/// What a tick knows about the sheet before reading rows
///
/// Rebuilt on every tick; the file may change between ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSnapshot {
    /// Number of rows in the sheet
    pub total_rows: usize,
    /// Selected columns (0-based, selector order, never empty)
    pub column_indices: Vec<u32>,
}

/// Validate the path and count the sheet's rows
///
/// Only the first selected column is read here; the full read of all
/// columns waits until the stop check has passed.
pub fn acquire_snapshot<R: SheetReader>(
    reader: &R,
    file_path: &Path,
    sheet: &SheetId,
    column_indices: Vec<u32>,
) -> Result<SheetSnapshot, TickError> {
    if file_path.as_os_str().is_empty() {
        return Err(TickError::InvalidPath);
    }
    if !file_path.exists() {
        return Err(TickError::FileNotFound(file_path.to_path_buf()));
    }
    if !file_path.is_file() {
        return Err(TickError::NotAFile(file_path.to_path_buf()));
    }

    let first = *column_indices
        .first()
        .ok_or_else(|| TickError::InvalidSelector("no columns selected".into()))?;

    let total_rows = reader
        .count_rows(file_path, sheet, first)
        .map_err(TickError::SheetRead)?;
    log::debug!(
        "{} sheet {}: {} rows",
        file_path.display(),
        sheet,
        total_rows
    );

    Ok(SheetSnapshot {
        total_rows,
        column_indices,
    })
}
