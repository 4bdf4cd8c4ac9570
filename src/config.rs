use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use audit_import::import::ImportLimits;
use audit_import::import::file::DEFAULT_MAX_FILE_SIZE_MB;

const APP_DIR: &str = "audit-import";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

fn default_max_file_size_mb() -> u64 {
    DEFAULT_MAX_FILE_SIZE_MB
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            store_path: None,
        }
    }
}

/// Settings that can be changed from the command line
pub const SETTING_NAMES: [&str; 2] = ["max-file-size-mb", "store-path"];

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config: {:?}", config.settings);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn limits(&self) -> ImportLimits {
        ImportLimits::new(self.settings.max_file_size_mb)
    }

    /// Configured store file, or `<data dir>/audit-import/store.json`
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.settings.store_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().context("Failed to get data directory")?;
        Ok(data_dir.join(APP_DIR).join("store.json"))
    }

    /// Apply a setting without saving
    pub fn apply_setting(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "max-file-size-mb" => {
                let limit: u64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid size '{}': expected a whole number of MB", value))?;
                if limit == 0 {
                    anyhow::bail!("max-file-size-mb must be greater than 0");
                }
                self.settings.max_file_size_mb = limit;
            }
            "store-path" => {
                let value = value.trim();
                if value.is_empty() {
                    anyhow::bail!("store-path must not be empty");
                }
                self.settings.store_path = Some(PathBuf::from(value));
            }
            _ => anyhow::bail!(
                "Unknown setting '{}'. Available settings: {}",
                name,
                SETTING_NAMES.join(", ")
            ),
        }
        Ok(())
    }

    /// Restore a setting to its default without saving
    pub fn reset_setting(&mut self, name: &str) -> Result<()> {
        match name {
            "max-file-size-mb" => self.settings.max_file_size_mb = default_max_file_size_mb(),
            "store-path" => self.settings.store_path = None,
            _ => anyhow::bail!(
                "Unknown setting '{}'. Available settings: {}",
                name,
                SETTING_NAMES.join(", ")
            ),
        }
        Ok(())
    }

    pub fn update_setting(&mut self, name: &str, value: &str) -> Result<()> {
        info!("Updating setting {} to: {}", name, value);
        self.apply_setting(name, value)?;
        self.save()
    }

    pub fn reset_and_save(&mut self, name: &str) -> Result<()> {
        info!("Resetting setting {}", name);
        self.reset_setting(name)?;
        self.save()
    }
}
