//! Per-tick feeder configuration

use std::path::{Path, PathBuf};

/// `end_row` value meaning "up to the last row of the sheet"
pub const END_OF_SHEET: i64 = -1;

/// Everything a tick needs, supplied fresh by the host on every call
///
/// `start_row` is the cursor: the host sets it from the previous tick's
/// [`TickResult::next_start_row`](crate::TickResult::next_start_row).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FeedConfig {
    /// Spreadsheet to read (`.xlsx`, `.xlsm`, `.csv` or `.tsv`)
    pub file_path: PathBuf,
    /// Comma-separated column letters, e.g. `"A,C,E"`
    pub column_selector: String,
    /// Join a row's cells with `","` instead of `" "`
    pub tidy_tags: bool,
    /// Rows read per tick (at least 1)
    pub read_count: usize,
    /// 1-based first row of this tick's window
    pub start_row: i64,
    /// 1-based last row (inclusive), or [`END_OF_SHEET`]
    pub end_row: i64,
    /// Literal substrings to delete from the output, one per line
    pub exclude_text: String,
    /// 0-based sheet index as digits, or a sheet name
    pub sheet_id: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::new(),
            column_selector: "A".to_string(),
            tidy_tags: false,
            read_count: 1,
            start_row: 1,
            end_row: END_OF_SHEET,
            exclude_text: String::new(),
            sheet_id: "0".to_string(),
        }
    }
}

impl FeedConfig {
    /// Configuration for a file with every other setting at its default
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the column selector
    pub fn with_columns<S: Into<String>>(mut self, selector: S) -> Self {
        self.column_selector = selector.into();
        self
    }

    /// Set tidy-tags mode
    pub fn with_tidy_tags(mut self, tidy: bool) -> Self {
        self.tidy_tags = tidy;
        self
    }

    /// Set the number of rows read per tick
    pub fn with_read_count(mut self, count: usize) -> Self {
        self.read_count = count;
        self
    }

    /// Set the cursor
    pub fn with_start_row(mut self, row: i64) -> Self {
        self.start_row = row;
        self
    }

    /// Set the last row to read
    pub fn with_end_row(mut self, row: i64) -> Self {
        self.end_row = row;
        self
    }

    /// Set the exclusion list (one literal per line)
    pub fn with_exclusions<S: Into<String>>(mut self, text: S) -> Self {
        self.exclude_text = text.into();
        self
    }

    /// Set the sheet identifier
    pub fn with_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet_id = sheet.into();
        self
    }
}
