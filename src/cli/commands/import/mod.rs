pub mod handler;

use clap::Args;
use std::path::PathBuf;

use audit_import::import::ImportKind;

pub use handler::handle_import_command;

#[derive(Args)]
pub struct ImportCommands {
    /// Import kind of the spreadsheet
    #[arg(help = "Import kind (e.g. sectors, auditors)")]
    pub kind: ImportKind,

    /// Spreadsheet to import (.xlsx or .xls)
    pub file: PathBuf,

    /// Store the accepted rows after validation
    #[arg(long, help = "Store accepted rows")]
    pub commit: bool,

    /// Write row errors to a spreadsheet
    #[arg(long, value_name = "FILE", help = "Write an error report (.xlsx)")]
    pub error_report: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
}
