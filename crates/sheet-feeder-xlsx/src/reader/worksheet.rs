//! Streaming worksheet scanner

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheet_feeder_core::{letters_to_column, CellValue, Error, MAX_ROWS};

/// A cell as it appears in the sheet XML, before shared strings are applied
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawCell {
    /// 0-based row
    pub row: u32,
    /// 0-based column
    pub col: u32,
    /// The `t` attribute, if any
    pub kind: Option<String>,
    /// Text of `<v>` or of an inline `<is>` string
    pub text: String,
}

impl RawCell {
    /// Convert to a cell value, looking up shared strings
    pub fn to_value(&self, shared_strings: &[String]) -> CellValue {
        let text = self.text.as_str();

        match self.kind.as_deref() {
            Some("s") => match text.trim().parse::<usize>() {
                Ok(idx) => match shared_strings.get(idx) {
                    Some(s) => CellValue::String(s.clone()),
                    None => {
                        log::warn!(
                            "shared string index {} out of range at row {}, column {}",
                            idx,
                            self.row + 1,
                            self.col + 1
                        );
                        CellValue::Empty
                    }
                },
                Err(_) => {
                    log::warn!(
                        "invalid shared string index '{}' at row {}, column {}",
                        text,
                        self.row + 1,
                        self.col + 1
                    );
                    CellValue::Empty
                }
            },
            Some("str") | Some("inlineStr") => {
                CellValue::String(decode_excel_escapes(text).into_owned())
            }
            Some("b") => CellValue::Boolean(text == "1" || text == "true"),
            Some("e") => CellValue::Error(text.to_string()),
            Some("d") => CellValue::String(text.to_string()),
            _ if text.is_empty() => CellValue::Empty,
            _ => match text.parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => {
                    log::warn!(
                        "non-numeric value '{}' in numeric cell at row {}, column {}",
                        text,
                        self.row + 1,
                        self.col + 1
                    );
                    CellValue::String(text.to_string())
                }
            },
        }
    }
}

/// Row count and width of a sheet, accumulated while scanning
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SheetBounds {
    rows: usize,
    width: u32,
}

impl SheetBounds {
    pub fn include(&mut self, cell: &RawCell) {
        self.rows = self.rows.max(cell.row as usize + 1);
        self.width = self.width.max(cell.col + 1);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Reject a column beyond the sheet's width; an empty sheet accepts any
    pub fn check_column(&self, column: u32) -> Result<(), Error> {
        if self.rows > 0 && column >= self.width {
            return Err(Error::column_out_of_range(column, self.width));
        }
        Ok(())
    }
}

/// Parse an A1-style reference into 0-based (row, column)
fn parse_cell_ref(s: &str) -> Option<(u32, u32)> {
    let split = s.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = s.split_at(split);
    let col = letters_to_column(letters.trim_start_matches('$')).ok()?;
    let row: u32 = digits.parse().ok()?;
    row.checked_sub(1).map(|row| (row, col))
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

/// Position tracking for rows and cells that omit their `r` attribute
#[derive(Debug, Default)]
struct Cursor {
    row: Option<u32>,
    col: Option<u32>,
}

impl Cursor {
    fn enter_row(&mut self, e: &BytesStart<'_>) {
        let explicit = attribute(e, b"r")
            .and_then(|r| r.parse::<u32>().ok())
            .and_then(|r| r.checked_sub(1));
        self.row = Some(match (explicit, self.row) {
            (Some(r), _) => r,
            (None, Some(prev)) => prev + 1,
            (None, None) => 0,
        });
        self.col = None;
    }

    fn place_cell(&mut self, e: &BytesStart<'_>) -> (u32, u32) {
        let (row, col) = match attribute(e, b"r").as_deref().and_then(parse_cell_ref) {
            Some(pos) => pos,
            None => (
                self.row.unwrap_or(0),
                self.col.map_or(0, |c| c + 1),
            ),
        };
        self.row = Some(row);
        self.col = Some(col);
        (row, col)
    }
}

/// Stream every cell holding a value through `visit`
///
/// Cells without a `<v>` or `<is>` child (style-only cells) are not visited.
/// Text is not trimmed: rich-text runs keep their spaces. A valued cell past
/// the worksheet row limit is an error.
pub(crate) fn scan<B, F>(source: B, mut visit: F) -> XlsxResult<()>
where
    B: BufRead,
    F: FnMut(RawCell),
{
    let mut xml_reader = Reader::from_reader(source);
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut cursor = Cursor::default();

    let mut current: Option<RawCell> = None;
    let mut has_value = false;
    let mut in_value = false;
    let mut in_inline = false;
    let mut in_inline_text = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => cursor.enter_row(&e),
                b"c" => {
                    let (row, col) = cursor.place_cell(&e);
                    current = Some(RawCell {
                        row,
                        col,
                        kind: attribute(&e, b"t"),
                        text: String::new(),
                    });
                    has_value = false;
                }
                b"v" if current.is_some() => {
                    in_value = true;
                    has_value = true;
                }
                b"is" if current.is_some() => {
                    in_inline = true;
                    has_value = true;
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_inline && !in_phonetic => in_inline_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => cursor.enter_row(&e),
                b"c" => {
                    cursor.place_cell(&e);
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(cell) = current.take() {
                        if has_value {
                            if cell.row >= MAX_ROWS {
                                return Err(XlsxError::InvalidFormat(format!(
                                    "row {} is beyond the worksheet limit",
                                    cell.row as u64 + 1
                                )));
                            }
                            visit(cell);
                        }
                    }
                }
                b"v" => in_value = false,
                b"is" => in_inline = false,
                b"rPh" => in_phonetic = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Event::Text(e) if in_value || in_inline_text => {
                if let Some(cell) = current.as_mut() {
                    cell.text.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// `_x000a_` is LF, `_x0009_` is TAB and `_x005f_` escapes a literal underscore.
/// Anything that is not exactly `_x` + four hex digits + `_` is kept as is.
pub(crate) fn decode_excel_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match escaped_char(candidate) {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

fn escaped_char(s: &str) -> Option<char> {
    if s.as_bytes().get(6) != Some(&b'_') {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
