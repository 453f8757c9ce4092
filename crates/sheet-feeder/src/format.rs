//! Row combination

use sheet_feeder_core::CellValue;

/// Combine one row's selected cells into a single line
///
/// Blank cells, and cells whose text trims to nothing, are dropped rather than
/// left as empty slots. The rest are trimmed and joined with `","` in tidy-tags
/// mode, otherwise with `" "`.
pub fn combine_row(cells: &[CellValue], tidy_tags: bool) -> String {
    let separator = if tidy_tags { "," } else { " " };
    cells
        .iter()
        .filter_map(CellValue::trimmed_text)
        .collect::<Vec<_>>()
        .join(separator)
}
