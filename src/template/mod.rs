//! Spreadsheet output: import templates and error reports

mod formatting;
pub mod report;
pub mod writer;

use std::path::PathBuf;
use thiserror::Error;

use crate::import::ImportKind;

pub use report::write_error_report;
pub use writer::{generate_template, save_template, template_file_name};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("no import configuration registered for '{0}'")]
    Unconfigured(ImportKind),

    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
