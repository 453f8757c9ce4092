//! Column letter arithmetic and column selector parsing

use crate::error::{Error, Result};
use crate::MAX_COLS;

/// Convert column letters to a 0-based index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive. Anything other than A-Z is rejected.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidSelector("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidSelector(format!(
                "invalid character '{}' in column '{}'",
                c, letters
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidSelector(format!("column '{}' is too large", letters)))?;
    }

    Ok(col - 1)
}

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col as u64 + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Resolve a comma-separated column selector into 0-based column indices
///
/// Tokens are trimmed and empty tokens are skipped. Selector order is kept
/// (and duplicates with it), since it decides how a row's cells are combined.
/// Columns past `XFD` are rejected.
///
/// # Examples
/// ```
/// use sheet_feeder_core::resolve_columns;
///
/// assert_eq!(resolve_columns("B,C").unwrap(), vec![1, 2]);
/// assert_eq!(resolve_columns("e, a").unwrap(), vec![4, 0]);
/// assert!(resolve_columns(" , ").is_err());
/// ```
pub fn resolve_columns(selector: &str) -> Result<Vec<u32>> {
    let columns = selector
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            let col = letters_to_column(token)?;
            if col >= MAX_COLS {
                return Err(Error::InvalidSelector(format!(
                    "column '{}' is beyond the worksheet limit",
                    token
                )));
            }
            Ok(col)
        })
        .collect::<Result<Vec<_>>>()?;

    if columns.is_empty() {
        return Err(Error::InvalidSelector(format!(
            "no columns in selector '{}'",
            selector
        )));
    }

    Ok(columns)
}
