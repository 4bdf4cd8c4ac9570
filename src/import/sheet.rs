//! Spreadsheet parsing: first sheet only, first row is the header

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use super::error::ImportFailure;

/// A decoded cell. Text is trimmed; empty text is `Blank`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Blank,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Blank
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Text form used by the rules; whole numbers drop the fraction
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Blank => String::new(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_number(s),
            CellValue::Blank => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Parse typed-in numbers; a decimal comma is accepted
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::String(s) => CellValue::text(s.as_str()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
            _ => CellValue::Blank,
        }
    }
}

/// One data row, keyed by header label
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// 1-based row number as shown by spreadsheet programs
    pub number: usize,
    pub cells: HashMap<String, CellValue>,
}

impl SheetRow {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            cells: HashMap::new(),
        }
    }

    pub fn with(mut self, label: &str, value: CellValue) -> Self {
        self.cells.insert(label.to_string(), value);
        self
    }

    pub fn cell(&self, label: &str) -> &CellValue {
        static BLANK: CellValue = CellValue::Blank;
        self.cells.get(label).unwrap_or(&BLANK)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// Outcome of parsing a readable file
#[derive(Debug, Clone, PartialEq)]
pub enum SheetContents {
    /// Header only, or nothing at all
    Empty { headers: Vec<String> },
    Rows(ParsedSheet),
}

/// Parse the first sheet of an `.xlsx`/`.xls` byte stream
pub fn parse_sheet(file_name: &str, bytes: &[u8]) -> Result<SheetContents, ImportFailure> {
    let format_error = |reason: String| ImportFailure::FileFormat {
        file_name: file_name.to_string(),
        reason,
    };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| format_error(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| format_error("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format_error(format!("error reading sheet '{}': {}", sheet_name, e)))?;

    if range.is_empty() {
        debug!("Sheet '{}' is empty", sheet_name);
        return Ok(SheetContents::Empty {
            headers: Vec::new(),
        });
    }

    // Ranges start at the first used cell, which is not always A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();

    let mut data_rows = Vec::new();
    for (idx, row) in rows.enumerate() {
        // header is offset 0, first data row offset 1; spreadsheet rows are 1-based
        let number = first_row + idx + 2;

        // decided on the raw row, so content under an unnamed column still counts
        if row.iter().all(|cell| CellValue::from(cell).is_blank()) {
            debug!("Skipping blank row {}", number);
            continue;
        }

        let mut sheet_row = SheetRow::new(number);
        for (col, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(col) else {
                continue;
            };
            if header.is_empty() {
                continue;
            }
            sheet_row.cells.insert(header.clone(), CellValue::from(cell));
        }

        data_rows.push(sheet_row);
    }

    debug!(
        "Parsed sheet '{}': {} headers, {} data rows",
        sheet_name,
        headers.len(),
        data_rows.len()
    );

    if data_rows.is_empty() {
        return Ok(SheetContents::Empty { headers });
    }

    Ok(SheetContents::Rows(ParsedSheet {
        name: sheet_name,
        headers,
        rows: data_rows,
    }))
}
