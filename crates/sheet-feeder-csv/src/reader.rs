//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use sheet_feeder_core::{CellValue, Error, SheetId, SheetReader};

/// CSV file reader
///
/// Every record is a data row; there is no header. Fields are kept verbatim
/// as strings and empty fields become [`CellValue::Empty`].
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    options: CsvReadOptions,
}

/// Row count and width of a CSV file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    rows: usize,
    width: u32,
}

impl Bounds {
    fn check_column(&self, column: u32) -> CsvResult<()> {
        if self.rows > 0 && column >= self.width {
            return Err(Error::column_out_of_range(column, self.width).into());
        }
        Ok(())
    }
}

impl CsvReader {
    /// Create a reader with the given options
    pub fn new(options: CsvReadOptions) -> Self {
        Self { options }
    }

    /// Create a reader for tab-separated files
    pub fn tsv() -> Self {
        Self::new(CsvReadOptions::tsv())
    }

    /// Count rows, checking that `column` exists
    pub fn count_rows_from<R: Read>(&self, reader: R, column: u32) -> CsvResult<usize> {
        let bounds = self.scan(reader, |_| {})?;
        bounds.check_column(column)?;
        Ok(bounds.rows)
    }

    /// Read every row projected onto `columns`
    pub fn read_columns_from<R: Read>(
        &self,
        reader: R,
        columns: &[u32],
    ) -> CsvResult<Vec<Vec<CellValue>>> {
        let mut rows = Vec::new();
        let bounds = self.scan(reader, |record| {
            let row = columns
                .iter()
                .map(|&col| match record.get(col as usize) {
                    Some(field) if !field.is_empty() => CellValue::string(field),
                    _ => CellValue::Empty,
                })
                .collect::<Vec<_>>();
            rows.push(row);
        })?;

        for col in columns {
            bounds.check_column(*col)?;
        }

        rows.truncate(bounds.rows);
        Ok(rows)
    }

    fn scan<R, F>(&self, reader: R, mut visit: F) -> CsvResult<Bounds>
    where
        R: Read,
        F: FnMut(&csv::StringRecord),
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut bounds = Bounds::default();
        let mut record = csv::StringRecord::new();
        let mut index = 0usize;

        while csv_reader.read_record(&mut record)? {
            let last = record
                .iter()
                .enumerate()
                .filter(|(_, field)| !field.is_empty())
                .map(|(i, _)| i)
                .last();
            if let Some(last) = last {
                bounds.rows = index + 1;
                bounds.width = bounds.width.max(last as u32 + 1);
            }
            visit(&record);
            index += 1;
        }

        Ok(bounds)
    }

    /// A CSV file has one sheet: index 0, or the file stem as its name
    fn check_sheet(path: &Path, sheet: &SheetId) -> CsvResult<()> {
        match sheet {
            SheetId::Index(0) => Ok(()),
            SheetId::Index(i) => Err(Error::SheetIndexOutOfBounds(*i, 1).into()),
            SheetId::Name(name) => {
                let stem = path.file_stem().and_then(|s| s.to_str());
                if stem == Some(name.as_str()) {
                    Ok(())
                } else {
                    Err(Error::SheetNotFound(name.clone()).into())
                }
            }
        }
    }
}

impl SheetReader for CsvReader {
    fn count_rows(
        &self,
        path: &Path,
        sheet: &SheetId,
        column: u32,
    ) -> sheet_feeder_core::Result<usize> {
        Self::check_sheet(path, sheet)?;
        let file = File::open(path)?;
        Ok(self.count_rows_from(file, column)?)
    }

    fn read_columns(
        &self,
        path: &Path,
        sheet: &SheetId,
        columns: &[u32],
    ) -> sheet_feeder_core::Result<Vec<Vec<CellValue>>> {
        Self::check_sheet(path, sheet)?;
        let file = File::open(path)?;
        let rows = self.read_columns_from(file, columns)?;
        log::debug!("read {} CSV rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}
