//! Fixture files for end-to-end feeder runs.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;

use sheet_feeder::{FeedConfig, TickOutcome};

/// Write `content` to a temp file with the given suffix
pub fn text_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("prompts")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

/// Sheet XML for rows of inline strings; empty strings leave the cell out
fn sheet_xml(rows: &[&[&str]]) -> String {
    let mut xml = String::from(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, text) in row.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            xml.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                column_letter(c),
                r + 1,
                text
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write a workbook with the given `(sheet name, rows)` pairs to an `.xlsx` temp file
pub fn xlsx_file(sheets: &[(&str, &[&[&str]])]) -> NamedTempFile {
    let mut workbook = String::from(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels = String::from(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        let id = i + 1;
        workbook.push_str(&format!(
            r#"<sheet name="{name}" sheetId="{id}" r:id="rId{id}"/>"#
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{id}.xml"/>"#
        ));
    }
    workbook.push_str("</sheets></workbook>");
    rels.push_str("</Relationships>");

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let mut add = |name: &str, body: &str| {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    };
    add(
        "[Content_Types].xml",
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#,
    );
    add("xl/workbook.xml", &workbook);
    add("xl/_rels/workbook.xml.rels", &rels);
    for (i, (_, rows)) in sheets.iter().enumerate() {
        add(&format!("xl/worksheets/sheet{}.xml", i + 1), &sheet_xml(rows));
    }
    let bytes = zip.finish().unwrap().into_inner();

    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Drive ticks the way a host would until a stop, an error, or `max_ticks`
///
/// Returns the output text of every continued tick and the final outcome.
pub fn run_until_stop(
    feeder: &sheet_feeder::RowCursorReader,
    mut config: FeedConfig,
    max_ticks: usize,
) -> (Vec<String>, Option<TickOutcome>) {
    let mut outputs = Vec::new();
    for _ in 0..max_ticks {
        match feeder.tick(&config) {
            TickOutcome::Continue(result) => {
                // A cursor that did not move means the last window was read
                config.start_row = if result.next_start_row == config.start_row {
                    config.start_row + config.read_count as i64
                } else {
                    result.next_start_row
                };
                outputs.push(result.output_text);
            }
            other => return (outputs, Some(other)),
        }
    }
    (outputs, None)
}
