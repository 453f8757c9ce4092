//! # sheet-feeder-xlsx
//!
//! Value-only XLSX (Office Open XML) reader for sheet-feeder.
//!
//! Worksheets are streamed cell by cell; styles, comments and formulas are
//! skipped (a formula cell yields its cached value).

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
