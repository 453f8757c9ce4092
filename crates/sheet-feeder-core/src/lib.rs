//! # sheet-feeder-core
//!
//! Core data structures shared by the sheet-feeder crates.
//!
//! This crate provides:
//! - [`CellValue`] - Raw cell values as returned by a sheet reader
//! - [`resolve_columns`] - Column selector parsing ("A,C,AA" -> `[0, 2, 26]`)
//! - [`SheetId`] - Sheet lookup by index or by name
//! - [`SheetReader`] - The provider trait implemented by the format crates
//!
//! ## Example
//!
//! ```rust
//! use sheet_feeder_core::{resolve_columns, SheetId};
//!
//! assert_eq!(resolve_columns("A, c ,AA").unwrap(), vec![0, 2, 26]);
//! assert_eq!(SheetId::parse("2"), SheetId::Index(2));
//! assert_eq!(SheetId::parse("Tags"), SheetId::Name("Tags".into()));
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use cell::CellValue;
pub use column::{column_to_letters, letters_to_column, resolve_columns};
pub use error::{Error, Result};
pub use sheet::{SheetId, SheetReader};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;
