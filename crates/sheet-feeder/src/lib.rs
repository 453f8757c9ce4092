//! # sheet-feeder
//!
//! A stateful row feeder for workflow hosts. Each *tick* reads a window of
//! rows from a spreadsheet, formats them as text and returns the cursor
//! position the host should pass back on the next tick. Once the configured
//! row range is exhausted the tick returns a stop signal instead.
//!
//! The feeder keeps no state of its own: the cursor (`start_row`) travels in
//! [`FeedConfig`] and comes back in [`TickResult::next_start_row`].
//!
//! Once the window reaches the last rows of the range the returned cursor
//! stops moving, so every further tick re-reads that window. A host that
//! wants to run through the range once steps past a cursor that did not move;
//! the tick after that returns the stop signal. A sheet with no rows never
//! stops; its tick returns [`EMPTY_SHEET_WARNING`] instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet_feeder::{FeedConfig, RowCursorReader, TickOutcome, EMPTY_SHEET_WARNING};
//!
//! let reader = RowCursorReader::new();
//! let mut config = FeedConfig::new("input/prompts.xlsx")
//!     .with_columns("A,C")
//!     .with_tidy_tags(true)
//!     .with_read_count(2);
//!
//! loop {
//!     match reader.tick(&config) {
//!         TickOutcome::Continue(result) if result.output_text == EMPTY_SHEET_WARNING => break,
//!         TickOutcome::Continue(result) => {
//!             println!("row {}:\n{}", result.current_row_label, result.output_text);
//!             config.start_row = if result.next_start_row == config.start_row {
//!                 // Last window read; move past it
//!                 config.start_row + config.read_count as i64
//!             } else {
//!                 result.next_start_row
//!             };
//!         }
//!         TickOutcome::Stop(signal) => {
//!             println!("{}", signal);
//!             break;
//!         }
//!         TickOutcome::Failed(err) => {
//!             eprintln!("{}", err);
//!             break;
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod exclude;
pub mod format;
pub mod outcome;
pub mod snapshot;
pub mod source;
pub mod tick;

pub use config::{FeedConfig, END_OF_SHEET};
pub use cursor::{check_stop, clamp_start, effective_end, next_start_row, ClampedStart};
pub use error::TickError;
pub use exclude::{filter_exclusions, ExclusionList};
pub use format::combine_row;
pub use outcome::{StopSignal, TickOutcome, TickResult, EMPTY_SHEET_WARNING, ERROR_LABEL};
pub use snapshot::{acquire_snapshot, SheetSnapshot};
pub use source::AutoReader;
pub use tick::RowCursorReader;

// Re-export the reader seam and the formats behind it
pub use sheet_feeder_core::{resolve_columns, CellValue, SheetId, SheetReader};
pub use sheet_feeder_csv::{CsvReadOptions, CsvReader};
pub use sheet_feeder_xlsx::XlsxReader;
