pub mod handler;

use clap::Args;
use std::path::PathBuf;

use audit_import::import::ImportKind;

pub use handler::handle_template_command;

#[derive(Args)]
pub struct TemplateCommands {
    /// Import kind the template is for
    #[arg(help = "Import kind (e.g. sectors, requirements)")]
    pub kind: ImportKind,

    /// Where to write the template
    #[arg(short, long, help = "Output file (defaults to modelo-<kind>.xlsx)")]
    pub output: Option<PathBuf>,
}
