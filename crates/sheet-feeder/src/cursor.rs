//! Cursor rules: stop detection, start-row clamping and cursor advance
//!
//! Rows are 1-based throughout. `read_count` is assumed to be at least 1.

use crate::config::END_OF_SHEET;
use crate::outcome::StopSignal;

/// The last row of the configured range
///
/// [`END_OF_SHEET`] resolves to `total_rows`; any other value is taken as is,
/// even when it is below 1 or beyond the sheet.
pub fn effective_end(end_row: i64, total_rows: usize) -> i64 {
    if end_row == END_OF_SHEET {
        total_rows as i64
    } else {
        end_row
    }
}

/// Decide whether the workflow must halt before reading anything
///
/// Fires only for a non-empty sheet whose cursor has moved past the range.
pub fn check_stop(total_rows: usize, start_row: i64, end_row: i64) -> Option<StopSignal> {
    let end = effective_end(end_row, total_rows);
    if total_rows > 0 && start_row > end {
        Some(StopSignal::new(end, start_row))
    } else {
        None
    }
}

/// A start row after clamping, remembering what was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedStart {
    /// Row actually used for reading
    pub row: i64,
    /// Row the host asked for
    pub original: i64,
}

impl ClampedStart {
    /// Whether clamping changed the requested row
    pub fn was_corrected(&self) -> bool {
        self.row != self.original
    }

    /// Row label reported to the host
    pub fn label(&self) -> String {
        if self.was_corrected() {
            format!("{} (corrected from {})", self.row, self.original)
        } else {
            self.row.to_string()
        }
    }
}

/// Clamp a requested start row into `[1, effective_end]`
///
/// `effective_end` must already be at least 1. A row past the end (only
/// possible when the sheet shrank after the stop check) moves back to the
/// last full window.
pub fn clamp_start(start_row: i64, effective_end: i64, read_count: usize) -> ClampedStart {
    let mut row = start_row.max(1);
    if row > effective_end {
        row = last_window_start(effective_end, read_count);
    }
    ClampedStart {
        row,
        original: start_row,
    }
}

/// Compute the cursor for the following tick
///
/// Once the window reaches the last full window the cursor stops moving; the
/// next tick then either re-reads that window or, if the host steps past the
/// end, stops. A finite `end_row` never lets the cursor land beyond
/// `effective_end + 1`.
pub fn next_start_row(start_row: i64, effective_end: i64, read_count: usize, end_row: i64) -> i64 {
    let last_start = last_window_start(effective_end, read_count);

    let next = if start_row >= last_start {
        start_row
    } else {
        let advanced = start_row.saturating_add(count_as_i64(read_count));
        if end_row != END_OF_SHEET && advanced > effective_end {
            effective_end + 1
        } else {
            advanced
        }
    };

    next.max(1)
}

fn last_window_start(effective_end: i64, read_count: usize) -> i64 {
    effective_end
        .saturating_sub(count_as_i64(read_count))
        .saturating_add(1)
        .max(1)
}

fn count_as_i64(read_count: usize) -> i64 {
    i64::try_from(read_count).unwrap_or(i64::MAX)
}
