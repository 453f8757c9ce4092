//! Fixture helpers: hand-assembled XLSX packages written to temp files.

use std::io::Write;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

/// Build an XLSX package with the given `(sheet name, <sheetData> body)` pairs
/// and shared string table.
pub fn xlsx_bytes(sheets: &[(&str, &str)], shared_strings: &[&str]) -> Vec<u8> {
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{name}" sheetId="{id}" r:id="rId{id}"/>"#,
            id = i + 1
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{id}" Type="{WORKSHEET_REL}" Target="worksheets/sheet{id}.xml"/>"#,
            id = i + 1
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let mut add = |name: &str, body: &str| {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    };

    add("[Content_Types].xml", CONTENT_TYPES);
    add("xl/workbook.xml", &workbook);
    add("xl/_rels/workbook.xml.rels", &rels);

    if !shared_strings.is_empty() {
        let mut sst = String::from(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        for s in shared_strings {
            sst.push_str(&format!("<si><t xml:space=\"preserve\">{s}</t></si>"));
        }
        sst.push_str("</sst>");
        add("xl/sharedStrings.xml", &sst);
    }

    for (i, (_, data)) in sheets.iter().enumerate() {
        add(
            &format!("xl/worksheets/sheet{}.xml", i + 1),
            &format!(
                r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
            ),
        );
    }

    zip.finish().unwrap().into_inner()
}

/// Write an XLSX package to a temp file with an `.xlsx` suffix
pub fn xlsx_file(sheets: &[(&str, &str)], shared_strings: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&xlsx_bytes(sheets, shared_strings)).unwrap();
    file.flush().unwrap();
    file
}
