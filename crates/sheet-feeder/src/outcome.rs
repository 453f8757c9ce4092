//! Tick results and the stop signal

use std::fmt;

use thiserror::Error;

use crate::error::TickError;

/// First host string of a failed tick
pub const ERROR_LABEL: &str = "Error";

/// Output text of a tick on a sheet with no rows
pub const EMPTY_SHEET_WARNING: &str = "Warning: sheet contains no rows";

/// Rows produced by a tick, plus the cursor for the next one
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickResult {
    /// Row number used, e.g. `"3"` or `"1 (corrected from 0)"`
    pub current_row_label: String,
    /// Formatted rows joined with newlines
    pub output_text: String,
    /// Value the host passes back as `start_row` on the next tick
    pub next_start_row: i64,
}

impl TickResult {
    /// Result for a sheet without rows; the cursor resets to 1
    pub fn empty_sheet() -> Self {
        Self {
            current_row_label: "0".to_string(),
            output_text: EMPTY_SHEET_WARNING.to_string(),
            next_start_row: 1,
        }
    }
}

/// Instruction to halt the workflow: the configured range is exhausted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{reason}")]
pub struct StopSignal {
    /// Human-readable explanation
    pub reason: String,
    /// The end row that was reached
    pub effective_end: i64,
    /// The start row that was requested
    pub start_row: i64,
}

impl StopSignal {
    pub fn new(effective_end: i64, start_row: i64) -> Self {
        Self {
            reason: format!(
                "Reached end row {} (requested start row {}); stopping workflow",
                effective_end, start_row
            ),
            effective_end,
            start_row,
        }
    }
}

/// What a tick produced
///
/// `Failed` carries an error as data and lets the workflow continue; `Stop`
/// must end it.
#[derive(Debug)]
pub enum TickOutcome {
    /// Rows were read
    Continue(TickResult),
    /// The row range is exhausted; halt the workflow
    Stop(StopSignal),
    /// The tick failed; report and carry on
    Failed(TickError),
}

impl TickOutcome {
    /// The host's two output strings
    ///
    /// Failures become `("Error", message)`. A stop has no normal result and
    /// yields `None`.
    pub fn host_result(&self) -> Option<(String, String)> {
        match self {
            TickOutcome::Continue(result) => Some((
                result.current_row_label.clone(),
                result.output_text.clone(),
            )),
            TickOutcome::Failed(err) => Some((ERROR_LABEL.to_string(), err.to_string())),
            TickOutcome::Stop(_) => None,
        }
    }

    /// The cursor for the next tick, if this tick advanced it
    pub fn next_start_row(&self) -> Option<i64> {
        match self {
            TickOutcome::Continue(result) => Some(result.next_start_row),
            _ => None,
        }
    }

    /// Whether the host must halt the workflow
    pub fn is_stop(&self) -> bool {
        matches!(self, TickOutcome::Stop(_))
    }

    /// Convert into a `Result`, treating the stop signal as the error path
    ///
    /// Hosts that propagate with `?` cannot silently continue past a stop.
    pub fn into_result(self) -> Result<Result<TickResult, TickError>, StopSignal> {
        match self {
            TickOutcome::Continue(result) => Ok(Ok(result)),
            TickOutcome::Failed(err) => Ok(Err(err)),
            TickOutcome::Stop(signal) => Err(signal),
        }
    }
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::Continue(result) => write!(
                f,
                "row {} -> next {}",
                result.current_row_label, result.next_start_row
            ),
            TickOutcome::Stop(signal) => write!(f, "stop: {}", signal),
            TickOutcome::Failed(err) => write!(f, "{}: {}", ERROR_LABEL, err),
        }
    }
}
