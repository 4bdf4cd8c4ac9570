use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;
mod config;

use cli::{Cli, Commands};
use cli::commands::checklist::handle_checklist_command;
use cli::commands::import::handle_import_command;
use cli::commands::kinds::handle_kinds_command;
use cli::commands::settings::handle_settings_command;
use cli::commands::template::handle_template_command;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("audit-import.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting audit-import");

    match cli.command {
        Commands::Kinds(args) => handle_kinds_command(args).await,
        Commands::Template(args) => handle_template_command(args).await,
        Commands::Import(args) => handle_import_command(args).await,
        Commands::Checklist(args) => handle_checklist_command(args).await,
        Commands::Settings(args) => handle_settings_command(args).await,
    }
}
