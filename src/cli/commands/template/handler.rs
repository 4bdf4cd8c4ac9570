use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::path::PathBuf;

use audit_import::import::ImportRegistry;
use audit_import::template::{save_template, template_file_name};

use super::TemplateCommands;

/// Write the import template for a kind to disk
///
/// # Arguments
/// * `args` - Kind and optional output path
///
/// # Returns
/// * `Ok(())` - Template written
/// * `Err(anyhow::Error)` - Workbook or file system error
pub async fn handle_template_command(args: TemplateCommands) -> Result<()> {
    let registry = ImportRegistry::standard();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(template_file_name(args.kind)));

    info!("Generating {} template at {:?}", args.kind, output);
    save_template(args.kind, &registry, &output)
        .with_context(|| format!("Failed to generate template for {}", args.kind))?;

    println!(
        "💾 Template for {} saved to: {}",
        args.kind.display_name().bold(),
        output.display().to_string().bright_green()
    );
    Ok(())
}
