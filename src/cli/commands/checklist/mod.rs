pub mod handler;

use clap::{Args, Subcommand};
use std::path::PathBuf;

pub use handler::handle_checklist_command;

#[derive(Args)]
pub struct ChecklistCommands {
    #[command(subcommand)]
    pub command: ChecklistSubcommands,
}

#[derive(Args)]
pub struct ChecklistSource {
    /// Requirements spreadsheet (.xlsx or .xls)
    pub file: PathBuf,

    /// Checklist name
    #[arg(long)]
    pub name: String,

    /// Standard the requirements belong to (e.g. "ISO 9001")
    #[arg(long)]
    pub standard: String,

    /// Version of the standard (e.g. "2015")
    #[arg(long)]
    pub version: String,
}

#[derive(Subcommand)]
pub enum ChecklistSubcommands {
    /// Build a checklist from a requirements spreadsheet without storing it
    Preview(ChecklistSource),
    /// Build a checklist and store it
    Commit(ChecklistSource),
    /// List stored checklists
    List,
}
