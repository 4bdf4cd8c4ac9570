pub mod checklist;
pub mod import;
pub mod kinds;
pub mod settings;
pub mod template;

use anyhow::{Context, Result};
use colored::*;
use log::debug;

use audit_import::import::ImportError;
use audit_import::store::JsonStore;

use crate::config::Config;

/// Open the JSON store configured in `config`
pub fn open_store(config: &Config) -> Result<JsonStore> {
    let path = config.store_path()?;
    debug!("Opening store at {:?}", path);
    JsonStore::open(&path).with_context(|| format!("Failed to open store: {}", path.display()))
}

/// Print row errors as an indented list, at most `limit` of them
pub fn print_row_errors(errors: &[ImportError], limit: usize) {
    for error in errors.iter().take(limit) {
        let value = error.value.as_text();
        let value = if value.is_empty() {
            String::new()
        } else {
            format!(" ({})", value.dimmed())
        };
        println!(
            "  {} {} {}: {}{}",
            "✗".bright_red(),
            format!("Linha {}", error.row).bold(),
            error.field.cyan(),
            error.message,
            value
        );
    }
    if errors.len() > limit {
        println!(
            "  {}",
            format!("... and {} more errors", errors.len() - limit).dimmed()
        );
    }
}
