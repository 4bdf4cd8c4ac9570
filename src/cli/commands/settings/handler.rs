use anyhow::Result;
use colored::*;
use log::info;

use super::{SettingsCommands, SettingsSubcommands};
use crate::config::Config;

pub async fn handle_settings_command(args: SettingsCommands) -> Result<()> {
    match args.command {
        SettingsSubcommands::Show => show_command().await,
        SettingsSubcommands::Set { name, value } => set_command(name, value).await,
        SettingsSubcommands::Reset { name } => reset_command(name).await,
    }
}

async fn show_command() -> Result<()> {
    let config = Config::load()?;
    let settings = config.get_settings();

    println!("{}", "Settings:".bold());
    println!(
        "  {:<18} {} MB",
        "max-file-size-mb".cyan(),
        settings.max_file_size_mb
    );
    let store_path = config.store_path()?;
    let source = if settings.store_path.is_some() { "" } else { " (default)" };
    println!(
        "  {:<18} {}{}",
        "store-path".cyan(),
        store_path.display(),
        source.dimmed()
    );
    println!();
    println!(
        "{} {}",
        "Config file:".dimmed(),
        Config::get_config_path()?.display().to_string().dimmed()
    );
    Ok(())
}

/// Set the value of a specific setting
///
/// # Arguments
/// * `name` - Setting name
/// * `value` - Setting value
///
/// # Returns
/// * `Ok(())` - Setting updated successfully
/// * `Err(anyhow::Error)` - Configuration error or invalid setting/value
async fn set_command(name: String, value: String) -> Result<()> {
    info!("Setting {} to {}", name, value);

    let mut config = Config::load()?;
    config.update_setting(&name, &value)?;

    println!("Set {} to {}", name.bright_green(), value);
    Ok(())
}

async fn reset_command(name: String) -> Result<()> {
    let mut config = Config::load()?;
    config.reset_and_save(&name)?;

    println!("Reset {} to its default value", name.bright_green());
    Ok(())
}
