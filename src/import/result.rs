use serde::Serialize;

use super::rules::FirstSeen;
use super::sheet::CellValue;

/// One failed rule on one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportError {
    /// 1-based spreadsheet row; the first data row under the header is 2
    pub row: usize,
    pub field: String,
    pub value: CellValue,
    pub message: String,
}

/// A row rejected because a unique value was already taken
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateEntry {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub first_seen: FirstSeen,
}

/// Outcome of one import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub errors: Vec<ImportError>,
    pub duplicates: Vec<DuplicateEntry>,
    pub total_processed: usize,
    pub total_success: usize,
    pub total_errors: usize,
    /// The sheet had no data rows at all
    pub no_data: bool,
}

impl<T> Default for ImportResult<T> {
    fn default() -> Self {
        Self {
            success: true,
            data: Vec::new(),
            errors: Vec::new(),
            duplicates: Vec::new(),
            total_processed: 0,
            total_success: 0,
            total_errors: 0,
            no_data: false,
        }
    }
}

impl<T> ImportResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for a readable file without data rows
    pub fn no_data() -> Self {
        Self {
            no_data: true,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, record: T) {
        self.data.push(record);
        self.total_processed += 1;
        self.total_success += 1;
        self.success = self.total_errors == 0;
    }

    /// Count one rejected row, whatever the number of errors on it
    pub fn record_failure(&mut self, errors: Vec<ImportError>, duplicates: Vec<DuplicateEntry>) {
        self.errors.extend(errors);
        self.duplicates.extend(duplicates);
        self.total_processed += 1;
        self.total_errors += 1;
        self.success = false;
    }

    /// Rows that produced at least one error, in order
    pub fn failed_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.dedup();
        rows
    }

    pub fn errors_for_row(&self, row: usize) -> impl Iterator<Item = &ImportError> {
        self.errors.iter().filter(move |e| e.row == row)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ImportResult<U> {
        ImportResult {
            success: self.success,
            data: self.data.into_iter().map(f).collect(),
            errors: self.errors,
            duplicates: self.duplicates,
            total_processed: self.total_processed,
            total_success: self.total_success,
            total_errors: self.total_errors,
            no_data: self.no_data,
        }
    }

    pub fn summary(&self) -> String {
        if self.no_data {
            return "Import Summary:\n • No data rows found".to_string();
        }
        format!(
            "Import Summary:\n\
             • Rows processed: {}\n\
             • Imported: {}\n\
             • Rejected: {}\n\
             • Errors: {}\n\
             • Duplicates: {}",
            self.total_processed,
            self.total_success,
            self.total_errors,
            self.errors.len(),
            self.duplicates.len()
        )
    }
}
