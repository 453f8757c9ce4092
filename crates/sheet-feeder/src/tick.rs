//! The tick: read one window of rows and advance the cursor

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use sheet_feeder_core::{resolve_columns, SheetId, SheetReader};

use crate::config::FeedConfig;
use crate::cursor::{check_stop, clamp_start, effective_end, next_start_row};
use crate::error::{error_chain, TickError};
use crate::exclude::filter_exclusions;
use crate::format::combine_row;
use crate::outcome::{TickOutcome, TickResult};
use crate::snapshot::acquire_snapshot;
use crate::source::AutoReader;

/// Reads a window of rows per tick and computes the next cursor
///
/// Holds no state besides its sheet reader; the cursor is carried by the
/// host in [`FeedConfig::start_row`].
#[derive(Debug, Clone, Default)]
pub struct RowCursorReader<R = AutoReader> {
    reader: R,
}

impl RowCursorReader<AutoReader> {
    /// Reader that picks the file format from the extension
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: SheetReader> RowCursorReader<R> {
    /// Use a specific sheet reader
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Run one tick
    ///
    /// Never panics: a panic inside the tick is caught here, logged, and
    /// reported as [`TickError::Internal`].
    pub fn tick(&self, config: &FeedConfig) -> TickOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(config))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                if err.is_config_error() {
                    log::warn!("tick rejected: {}", err);
                } else {
                    log::error!(
                        "tick failed for '{}': {}",
                        config.file_path.display(),
                        error_chain(&err)
                    );
                    log::debug!("{:#?}", err);
                }
                TickOutcome::Failed(err)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!(
                    "tick panicked for '{}': {}",
                    config.file_path.display(),
                    message
                );
                TickOutcome::Failed(TickError::Internal(message))
            }
        }
    }

    fn run(&self, config: &FeedConfig) -> Result<TickOutcome, TickError> {
        let columns = resolve_columns(&config.column_selector)?;
        if config.read_count == 0 {
            return Err(TickError::InvalidReadCount);
        }
        let sheet = SheetId::parse(&config.sheet_id);

        let snapshot = acquire_snapshot(&self.reader, &config.file_path, &sheet, columns)?;
        let total_rows = snapshot.total_rows;

        if let Some(signal) = check_stop(total_rows, config.start_row, config.end_row) {
            log::info!("{}", signal);
            return Ok(TickOutcome::Stop(signal));
        }

        if total_rows == 0 {
            log::warn!(
                "{} sheet {} has no rows",
                config.file_path.display(),
                sheet
            );
            return Ok(TickOutcome::Continue(TickResult::empty_sheet()));
        }

        let table = self
            .reader
            .read_columns(&config.file_path, &sheet, &snapshot.column_indices)
            .map_err(TickError::SheetRead)?;

        let end = effective_end(config.end_row, total_rows).max(1);
        let start = clamp_start(config.start_row, end, config.read_count);
        if start.was_corrected() {
            log::warn!("start row {}", start.label());
        }

        // 0-based, end exclusive
        let read_start = (start.row - 1) as usize;
        let read_end = read_start.saturating_add(config.read_count).min(total_rows);
        log::debug!(
            "reading rows {}..={} of {}",
            read_start + 1,
            read_end,
            total_rows
        );

        let rows = table
            .iter()
            .take(read_end)
            .skip(read_start)
            .map(|cells| combine_row(cells, config.tidy_tags))
            .collect();
        let output_text = filter_exclusions(rows, &config.exclude_text).join("\n");

        Ok(TickOutcome::Continue(TickResult {
            current_row_label: start.label(),
            output_text,
            next_start_row: next_start_row(start.row, end, config.read_count, config.end_row),
        }))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
