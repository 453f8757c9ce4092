//! # sheet-feeder-csv
//!
//! CSV reader for sheet-feeder. A CSV file is a workbook with a single sheet.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
