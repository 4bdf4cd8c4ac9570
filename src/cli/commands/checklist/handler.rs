use anyhow::{Context, Result};
use colored::*;

use audit_import::checklist::{Checklist, ChecklistMeta, build_checklist_preview, commit_checklist};
use audit_import::import::{
    ExistingRecords, ImportFile, ImportRegistry, Importer, NormativeRequirement,
};
use audit_import::store::ChecklistStore;

use super::{ChecklistCommands, ChecklistSource, ChecklistSubcommands};
use crate::cli::commands::{open_store, print_row_errors};
use crate::config::Config;

const ERROR_PREVIEW_LIMIT: usize = 20;

pub async fn handle_checklist_command(args: ChecklistCommands) -> Result<()> {
    match args.command {
        ChecklistSubcommands::Preview(source) => preview_command(source).await,
        ChecklistSubcommands::Commit(source) => commit_command(source).await,
        ChecklistSubcommands::List => list_command().await,
    }
}

async fn preview_command(source: ChecklistSource) -> Result<()> {
    let config = Config::load()?;
    let checklist = build_from_file(&config, &source).await?;
    print_checklist(&checklist);
    println!();
    println!("{}", "Preview only: use 'checklist commit' to store it.".dimmed());
    Ok(())
}

async fn commit_command(source: ChecklistSource) -> Result<()> {
    let config = Config::load()?;
    let checklist = build_from_file(&config, &source).await?;
    print_checklist(&checklist);

    let mut store = open_store(&config)?;
    let id = commit_checklist(checklist, &mut store).context("Failed to store checklist")?;
    println!();
    println!("{} Checklist stored with id {}", "✓".bright_green(), id.to_string().bold());
    Ok(())
}

async fn list_command() -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config)?;

    if store.checklists().is_empty() {
        println!("No checklists stored");
        return Ok(());
    }

    println!("{}", "Stored checklists:".bold());
    for checklist in store.checklists() {
        println!(
            "  {} {} {} {}",
            checklist.id.to_string().dimmed(),
            checklist.name.bright_green(),
            format!("{} {}", checklist.standard, checklist.version).cyan(),
            format!(
                "({} categories, {} items, weight {})",
                checklist.categories.len(),
                checklist.item_count(),
                checklist.total_weight
            )
            .dimmed()
        );
    }
    Ok(())
}

/// Import the requirements and group them; any rejected row aborts
async fn build_from_file(config: &Config, source: &ChecklistSource) -> Result<Checklist> {
    let registry = ImportRegistry::standard();
    let importer = Importer::new(&registry, config.limits());
    let file = ImportFile::load(&source.file).await?;

    let result = importer
        .import::<NormativeRequirement>(&file, &ExistingRecords::new())
        .with_context(|| format!("Failed to import {}", source.file.display()))?;

    if result.no_data {
        anyhow::bail!("{} has no requirement rows", source.file.display());
    }
    if !result.success {
        println!("{}", result.summary());
        println!();
        print_row_errors(&result.errors, ERROR_PREVIEW_LIMIT);
        anyhow::bail!(
            "{} of {} requirement rows were rejected",
            result.total_errors,
            result.total_processed
        );
    }

    let meta = ChecklistMeta::new(&source.name, &source.standard, &source.version);
    let checklist = build_checklist_preview(&result.data, &meta)?;
    Ok(checklist)
}

fn print_checklist(checklist: &Checklist) {
    println!(
        "📋 {} {}",
        checklist.name.bold(),
        format!("({} {})", checklist.standard, checklist.version).dimmed()
    );
    for category in &checklist.categories {
        println!(
            "  {}. {} {}",
            category.order,
            category.name.cyan(),
            format!("peso {}", category.weight).dimmed()
        );
        for item in &category.items {
            println!("     • {} {}", item.title, format!("[{}]", item.max_score).dimmed());
        }
    }
    let total = format!("Total weight: {}", checklist.total_weight);
    if checklist.is_complete() {
        println!("{}", total.bright_green());
    } else {
        println!("{} {}", total.yellow(), "(weights do not add up to 100)".dimmed());
    }
}
