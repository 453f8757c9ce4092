//! Format dispatch by file extension

use std::path::Path;

use sheet_feeder_core::{CellValue, Error, Result, SheetId, SheetReader};
use sheet_feeder_csv::{CsvReadOptions, CsvReader};
use sheet_feeder_xlsx::XlsxReader;

/// Reader that picks the format from the file extension
///
/// `.xlsx`/`.xlsm` are read as XLSX, `.csv` with the configured CSV options
/// and `.tsv` as tab-separated. Anything else is an unsupported format.
#[derive(Debug, Clone, Default)]
pub struct AutoReader {
    csv_options: CsvReadOptions,
}

enum Format {
    Xlsx(XlsxReader),
    Csv(CsvReader),
}

impl AutoReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these options for `.csv` files
    pub fn with_csv_options(mut self, options: CsvReadOptions) -> Self {
        self.csv_options = options;
        self
    }

    fn format(&self, path: &Path) -> Result<Format> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(Format::Xlsx(XlsxReader::new())),
            Some("csv") => Ok(Format::Csv(CsvReader::new(self.csv_options.clone()))),
            Some("tsv") => Ok(Format::Csv(CsvReader::tsv())),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl SheetReader for AutoReader {
    fn count_rows(&self, path: &Path, sheet: &SheetId, column: u32) -> Result<usize> {
        match self.format(path)? {
            Format::Xlsx(reader) => reader.count_rows(path, sheet, column),
            Format::Csv(reader) => reader.count_rows(path, sheet, column),
        }
    }

    fn read_columns(
        &self,
        path: &Path,
        sheet: &SheetId,
        columns: &[u32],
    ) -> Result<Vec<Vec<CellValue>>> {
        match self.format(path)? {
            Format::Xlsx(reader) => reader.read_columns(path, sheet, columns),
            Format::Csv(reader) => reader.read_columns(path, sheet, columns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dispatch_by_extension() {
        let reader = AutoReader::new();
        assert!(matches!(
            reader.format(Path::new("a.XLSX")),
            Ok(Format::Xlsx(_))
        ));
        assert!(matches!(reader.format(Path::new("a.xlsm")), Ok(Format::Xlsx(_))));
        assert!(matches!(reader.format(Path::new("a.csv")), Ok(Format::Csv(_))));
        assert!(matches!(reader.format(Path::new("a.tsv")), Ok(Format::Csv(_))));
        assert!(matches!(
            reader.format(Path::new("a.xls")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            reader.format(Path::new("noext")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_csv_options_apply() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a;b\n").unwrap();
        file.flush().unwrap();

        let reader =
            AutoReader::new().with_csv_options(CsvReadOptions::default().with_delimiter(b';'));
        let rows = reader
            .read_columns(file.path(), &SheetId::Index(0), &[1])
            .unwrap();
        assert_eq!(rows, vec![vec![CellValue::string("b")]]);
    }
}
