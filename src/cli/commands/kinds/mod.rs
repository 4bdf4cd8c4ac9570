pub mod handler;

use clap::Args;

use audit_import::import::ImportKind;

pub use handler::handle_kinds_command;

#[derive(Args)]
pub struct KindsCommands {
    /// Show the columns of a single kind
    #[arg(help = "Import kind (e.g. sectors, audit-types)")]
    pub kind: Option<ImportKind>,
}
