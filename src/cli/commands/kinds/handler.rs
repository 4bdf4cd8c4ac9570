use anyhow::Result;
use colored::*;

use audit_import::import::{ImportConfig, ImportRegistry};

use super::KindsCommands;

/// List import kinds, or the column contract of one kind
pub async fn handle_kinds_command(args: KindsCommands) -> Result<()> {
    let registry = ImportRegistry::standard();

    match args.kind {
        Some(kind) => {
            let config = registry.config(kind)?;
            print_columns(config);
        }
        None => {
            println!("{}", "Import kinds:".bold());
            for kind in registry.kinds() {
                let config = registry.config(kind)?;
                println!(
                    "  {:<14} {} ({} columns)",
                    kind.slug().bright_green(),
                    kind.display_name(),
                    config.columns.len()
                );
            }
            println!();
            println!("{}", "Use 'audit-import kinds <kind>' to see the columns of a kind.".dimmed());
        }
    }

    Ok(())
}

fn print_columns(config: &ImportConfig) {
    println!(
        "{} {}",
        config.kind.display_name().bold(),
        format!("(sheet \"{}\")", config.sheet_name).dimmed()
    );
    for column in &config.columns {
        let marker = if column.required {
            "*".bright_red().to_string()
        } else {
            " ".to_string()
        };
        let mut details = Vec::new();
        if let Some(max) = column.max_length {
            details.push(format!("max {}", max));
        }
        if !column.options.is_empty() {
            details.push(column.options.join(" | "));
        }
        println!(
            "  {}{:<24} {}",
            marker,
            column.label.cyan(),
            details.join(", ").dimmed()
        );
    }
}
