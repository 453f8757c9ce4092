//! Sheet identifiers and the sheet reader seam

use std::fmt;
use std::path::Path;

use crate::cell::CellValue;
use crate::error::Result;

/// Identifies a sheet inside a workbook
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SheetId {
    /// 0-based sheet position
    Index(usize),
    /// Sheet name as shown on its tab
    Name(String),
}

impl SheetId {
    /// Parse a sheet identifier
    ///
    /// A non-empty string of ASCII digits is a 0-based index; anything else,
    /// including the empty string, is taken as a sheet name.
    pub fn parse(s: &str) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = s.parse() {
                return SheetId::Index(index);
            }
        }
        SheetId::Name(s.to_string())
    }
}

impl Default for SheetId {
    fn default() -> Self {
        SheetId::Index(0)
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetId::Index(i) => write!(f, "#{}", i),
            SheetId::Name(name) => f.write_str(name),
        }
    }
}

/// Provider of sheet rows
///
/// Implementations re-open `path` on every call and keep nothing between
/// calls, so changes to the file are visible on the next read.
///
/// A sheet's row count is the 1-based number of the last row holding any
/// value. Its width is one past the last column holding any value. Both
/// methods reject a requested column at or beyond the width, unless the sheet
/// has no rows at all.
pub trait SheetReader {
    /// Count the rows of a sheet, checking that `column` exists
    fn count_rows(&self, path: &Path, sheet: &SheetId, column: u32) -> Result<usize>;

    /// Read every row of a sheet, projected onto `columns` in the given order
    ///
    /// Returns one entry per row (the row count as defined above), each with
    /// one value per requested column. Absent cells are [`CellValue::Empty`].
    fn read_columns(&self, path: &Path, sheet: &SheetId, columns: &[u32])
        -> Result<Vec<Vec<CellValue>>>;
}

impl<R: SheetReader + ?Sized> SheetReader for &R {
    fn count_rows(&self, path: &Path, sheet: &SheetId, column: u32) -> Result<usize> {
        (**self).count_rows(path, sheet, column)
    }

    fn read_columns(
        &self,
        path: &Path,
        sheet: &SheetId,
        columns: &[u32],
    ) -> Result<Vec<Vec<CellValue>>> {
        (**self).read_columns(path, sheet, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_id() {
        assert_eq!(SheetId::parse("0"), SheetId::Index(0));
        assert_eq!(SheetId::parse("12"), SheetId::Index(12));
        assert_eq!(SheetId::parse("Sheet1"), SheetId::Name("Sheet1".into()));
        assert_eq!(SheetId::parse("-1"), SheetId::Name("-1".into()));
        assert_eq!(SheetId::parse(""), SheetId::Name(String::new()));
        assert_eq!(SheetId::parse(" 1"), SheetId::Name(" 1".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(SheetId::Index(3).to_string(), "#3");
        assert_eq!(SheetId::Name("Tags".into()).to_string(), "Tags");
    }
}
