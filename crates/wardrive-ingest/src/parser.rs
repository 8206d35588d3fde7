use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::schema::{HeaderMap, RawRecord};
use crate::{Error, Result};

/// Read one capture file into raw records.
///
/// Tolerates the quirks of real collector output: a device banner line
/// before the header (WiGLE exports), ragged rows with extra or missing
/// trailing columns, and blank lines. The header row is located by
/// scanning for a line that names both MAC and SSID columns; everything
/// above it is ignored.
///
/// This is a file-shape pass only. Rows that are structurally readable
/// but semantically bad (unparsable MAC, bad coordinates) flow through
/// as raw text and are rejected later by the normalizer.
pub fn parse_capture(path: &Path) -> Result<Vec<RawRecord>> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    let Some((header_line_idx, header_offset)) = locate_header(&text) else {
        return Err(Error::NoHeader(path.to_path_buf()));
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(text[header_offset..].as_bytes());

    let header_map = HeaderMap::new(reader.headers()?);

    let mut records = Vec::new();
    let mut record = StringRecord::new();
    // 1-based data line numbers, counting from the top of the file
    let mut line = header_line_idx as u64 + 1;
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {
                line += 1;
                if record.iter().all(|field| field.trim().is_empty()) {
                    continue;
                }
                records.push(header_map.extract(&record, line));
            }
            Ok(false) => break,
            Err(_) => {
                // A row the CSV reader itself cannot shape. Surface it as
                // an empty record so the normalizer counts it as a data
                // error; the file keeps going.
                line += 1;
                records.push(RawRecord {
                    line,
                    ..Default::default()
                });
            }
        }
    }

    Ok(records)
}

/// Find the header row: first line mentioning both MAC and SSID.
/// Returns (0-based line index, byte offset of that line).
fn locate_header(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (idx, raw_line) in text.split_inclusive('\n').enumerate() {
        let upper = raw_line.to_uppercase();
        if upper.contains("MAC") && upper.contains("SSID") {
            return Some((idx, offset));
        }
        offset += raw_line.len();
    }
    None
}
