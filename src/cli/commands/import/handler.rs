use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::fs;

use audit_import::import::{ImportFile, ImportRegistry, Importer};
use audit_import::store::RecordStore;
use audit_import::template::write_error_report;

use super::ImportCommands;
use crate::cli::commands::{open_store, print_row_errors};
use crate::config::Config;

const ERROR_PREVIEW_LIMIT: usize = 20;

/// Validate a spreadsheet against the stored records
///
/// Accepted rows are written to the store only with `--commit`.
///
/// # Arguments
/// * `args` - Kind, file and output options
///
/// # Returns
/// * `Ok(())` - The file was processed, even if some rows were rejected
/// * `Err(anyhow::Error)` - The file was rejected or could not be read
pub async fn handle_import_command(args: ImportCommands) -> Result<()> {
    if args.commit && !args.kind.is_master_data() {
        anyhow::bail!(
            "Requirements are stored as checklists. Use 'audit-import checklist commit' instead."
        );
    }

    let config = Config::load()?;
    let mut store = open_store(&config)?;
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, config.limits());

    let file = ImportFile::load(&args.file).await?;
    println!(
        "📄 Importing {} from: {}",
        args.kind.display_name().bold(),
        args.file.display().to_string().cyan()
    );

    let existing = store.existing_records();
    let outcome = importer
        .import_any(args.kind, &file, &existing)
        .with_context(|| format!("Failed to import {}", args.file.display()))?;
    let result = outcome.into_any();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.no_data {
        println!("{}", "⚠️  The spreadsheet has no data rows".yellow());
    } else {
        println!();
        println!("{}", result.summary());
        if !result.errors.is_empty() {
            println!();
            println!("{}", "Rejected rows:".bright_red().bold());
            print_row_errors(&result.errors, ERROR_PREVIEW_LIMIT);
        }
    }

    if let Some(report_path) = &args.error_report {
        if result.errors.is_empty() {
            println!("{}", "No errors, skipping error report".dimmed());
        } else {
            let bytes = write_error_report(&result.errors)?;
            fs::write(report_path, bytes)
                .with_context(|| format!("Failed to write error report: {}", report_path.display()))?;
            println!(
                "💾 Error report saved to: {}",
                report_path.display().to_string().bright_green()
            );
        }
    }

    if args.commit {
        if result.data.is_empty() {
            println!("{}", "Nothing to store".dimmed());
        } else {
            let written = store.insert_records(result.data)?;
            info!("Stored {} {} records", written, args.kind);
            println!(
                "{} Stored {} records in {}",
                "✓".bright_green(),
                written,
                store.path().display()
            );
        }
    } else if result.total_success > 0 {
        println!();
        println!("{}", "Dry run: use --commit to store the accepted rows.".dimmed());
    }

    Ok(())
}
