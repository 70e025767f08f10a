//! Reads the cut-point table.
//!
//! The table is CSV with a header row. Every data record becomes a [`Row`]
//! mapping column names to raw cell text, tagged with the 1-based line number
//! it is reported under (the header is line 1).

use crate::error::ClipError;
use std::collections::HashMap;
use std::io::Read;

/// One raw data record of the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: u64,
    pub cells: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Parses every record of a CSV table into rows.
///
/// Records whose width differs from the header are rejected. Blank lines are
/// skipped. Each row reports the physical line it starts on, so quoted cells
/// spanning several lines do not shift later line numbers.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<Row>, ClipError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| ClipError::MalformedTable {
            line: 1,
            message: e.to_string(),
        })?
        .clone();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let fallback = index as u64 + 2;
        let record = record.map_err(|e| ClipError::MalformedTable {
            line: e.position().map_or(fallback, |pos| pos.line()),
            message: e.to_string(),
        })?;
        let line = record.position().map_or(fallback, |pos| pos.line());

        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(Row { line, cells });
    }

    log::debug!("Read {} data rows", rows.len());
    Ok(rows)
}
