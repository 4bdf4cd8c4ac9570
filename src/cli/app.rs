use super::commands::checklist::ChecklistCommands;
use super::commands::import::ImportCommands;
use super::commands::kinds::KindsCommands;
use super::commands::settings::SettingsCommands;
use super::commands::template::TemplateCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "audit-import")]
#[command(about = "Spreadsheet import of audit master data and normative requirements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the importable kinds and their columns
    Kinds(KindsCommands),
    /// Generate an import template spreadsheet
    Template(TemplateCommands),
    /// Validate a spreadsheet and optionally store the accepted rows
    Import(ImportCommands),
    /// Build checklists from normative requirement spreadsheets
    Checklist(ChecklistCommands),
    /// Application settings management
    Settings(SettingsCommands),
}
