//! XLSX reader

mod worksheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheet_feeder_core::{CellValue, Error, SheetId, SheetReader};

use worksheet::{decode_excel_escapes, RawCell, SheetBounds};

/// XLSX file reader
///
/// Every call opens the file afresh; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl XlsxReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// List sheet names in workbook order
    pub fn sheet_names<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<String>> {
        let mut package = Package::open(File::open(path)?)?;
        Ok(package
            .sheets()?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    /// Count the rows of a sheet read from any seekable source
    ///
    /// The shared string table is not loaded: only cell positions matter here.
    pub fn count_rows_from<R: Read + Seek>(
        reader: R,
        sheet: &SheetId,
        column: u32,
    ) -> XlsxResult<usize> {
        let mut package = Package::open(reader)?;
        let part = package.sheet_part(sheet)?;

        let mut bounds = SheetBounds::default();
        package.scan_cells(&part, |cell| bounds.include(&cell))?;

        bounds.check_column(column)?;
        Ok(bounds.rows())
    }

    /// Read a sheet from any seekable source, projected onto `columns`
    pub fn read_columns_from<R: Read + Seek>(
        reader: R,
        sheet: &SheetId,
        columns: &[u32],
    ) -> XlsxResult<Vec<Vec<CellValue>>> {
        let mut package = Package::open(reader)?;
        let part = package.sheet_part(sheet)?;
        let shared_strings = package.shared_strings()?;

        // A column may be selected more than once
        let mut slots: HashMap<u32, Vec<usize>> = HashMap::new();
        for (pos, col) in columns.iter().enumerate() {
            slots.entry(*col).or_default().push(pos);
        }

        let width = columns.len();
        let mut bounds = SheetBounds::default();
        let mut rows: Vec<Vec<CellValue>> = Vec::new();

        package.scan_cells(&part, |cell| {
            bounds.include(&cell);

            let Some(positions) = slots.get(&cell.col) else {
                return;
            };
            let value = cell.to_value(&shared_strings);
            if value.is_empty() {
                return;
            }

            let row = cell.row as usize;
            if rows.len() <= row {
                rows.resize_with(row + 1, || vec![CellValue::Empty; width]);
            }
            for &pos in positions {
                rows[row][pos] = value.clone();
            }
        })?;

        for col in columns {
            bounds.check_column(*col)?;
        }

        rows.resize_with(bounds.rows(), || vec![CellValue::Empty; width]);
        Ok(rows)
    }
}

impl SheetReader for XlsxReader {
    fn count_rows(
        &self,
        path: &Path,
        sheet: &SheetId,
        column: u32,
    ) -> sheet_feeder_core::Result<usize> {
        let file = File::open(path)?;
        Ok(Self::count_rows_from(file, sheet, column)?)
    }

    fn read_columns(
        &self,
        path: &Path,
        sheet: &SheetId,
        columns: &[u32],
    ) -> sheet_feeder_core::Result<Vec<Vec<CellValue>>> {
        let file = File::open(path)?;
        Ok(Self::read_columns_from(file, sheet, columns)?)
    }
}

/// A sheet listed in workbook.xml, with its resolved part path
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    part: Option<String>,
}

/// An opened XLSX zip package
struct Package<R> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    fn open(reader: R) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        Ok(Self { archive })
    }

    /// Resolve a sheet identifier to its worksheet part path
    fn sheet_part(&mut self, sheet: &SheetId) -> XlsxResult<String> {
        let sheets = self.sheets()?;

        let entry = match sheet {
            SheetId::Index(index) => sheets
                .get(*index)
                .ok_or(Error::SheetIndexOutOfBounds(*index, sheets.len()))?,
            SheetId::Name(name) => sheets
                .iter()
                .find(|entry| &entry.name == name)
                .ok_or_else(|| Error::SheetNotFound(name.clone()))?,
        };

        let part = entry
            .part
            .clone()
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet for '{}'", entry.name)))?;
        log::debug!("sheet {} resolved to part {}", sheet, part);
        Ok(part)
    }

    /// Read workbook.xml and its relationships into sheet entries
    fn sheets(&mut self) -> XlsxResult<Vec<SheetEntry>> {
        let rels = self.read_workbook_rels()?;
        let sheets = self
            .read_workbook_xml()?
            .into_iter()
            .map(|(name, r_id)| SheetEntry {
                part: rels.get(&r_id).cloned(),
                name,
            })
            .collect();
        Ok(sheets)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml(&mut self) -> XlsxResult<Vec<(String, String)>> {
        let file = self
            .archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            name = attr.unescape_value().ok().map(|s| s.to_string());
                        } else if attr.key.prefix().is_some()
                            && attr.key.local_name().as_ref() == b"id"
                        {
                            r_id = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to map rIds to worksheet part paths
    fn read_workbook_rels(&mut self) -> XlsxResult<HashMap<String, String>> {
        let file = self
            .archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut is_worksheet = false;

                    for attr in e.attributes().flatten() {
                        let value = attr.unescape_value().ok().map(|s| s.to_string());
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Target" => target = value,
                            b"Type" => {
                                is_worksheet =
                                    value.map_or(false, |t| t.ends_with("/worksheet"));
                            }
                            _ => {}
                        }
                    }

                    if let (true, Some(id), Some(target)) = (is_worksheet, id, target) {
                        // Target is relative to the xl/ folder unless absolute
                        let part = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("xl/{}", target),
                        };
                        rels.insert(id, part);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the shared strings table (the part is optional)
    fn shared_strings(&mut self) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match self.archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        // Runs of rich text keep their leading and trailing spaces
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_phonetic = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current).into_owned());
                        current.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Text(e) if in_t => {
                    current.push_str(&e.unescape()?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Stream every valued cell of a worksheet part through `visit`
    fn scan_cells<F>(&mut self, part: &str, visit: F) -> XlsxResult<()>
    where
        F: FnMut(RawCell),
    {
        let file = self
            .archive
            .by_name(part)
            .map_err(|_| XlsxError::MissingPart(part.to_string()))?;
        worksheet::scan(BufReader::new(file), visit)
    }
}
