//! File-level import failures.
//!
//! These abort an import run. Row-level problems are never errors here;
//! they are collected as [`ImportError`](super::result::ImportError) data.

use std::path::PathBuf;
use thiserror::Error;

use super::kind::ImportKind;

#[derive(Debug, Error)]
pub enum ImportFailure {
    /// Extension not on the allow-list
    #[error("unsupported file type for '{file_name}': expected {allowed}")]
    FileType { file_name: String, allowed: String },

    /// File larger than the configured ceiling
    #[error("file '{file_name}' is {size_mb:.2} MB, above the {limit_mb} MB limit")]
    FileSize {
        file_name: String,
        size_mb: f64,
        limit_mb: u64,
    },

    /// Bytes could not be decoded as a spreadsheet
    #[error("'{file_name}' is not a readable spreadsheet: {reason}")]
    FileFormat { file_name: String, reason: String },

    /// The file could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no import configuration registered for '{0}'")]
    Unconfigured(ImportKind),
}

impl ImportFailure {
    /// Whether the failure was raised by the file gate, before any parsing
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, ImportFailure::FileType { .. } | ImportFailure::FileSize { .. })
    }
}
