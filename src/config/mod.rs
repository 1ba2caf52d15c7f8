pub mod init;
mod schema;

pub use schema::{Config, ThemeMode};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::scoring::{build_band_table, BandTable};

const DEFAULT_FLASH: Duration = Duration::from_secs(3);

/// Get the config directory path (~/.config/rank-delta/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("rank-delta"))
}

/// Get the default config file path (~/.config/rank-delta/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// With `path` set, the file must exist. Without it, the default location is
/// tried and a missing file yields the built-in defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => match get_config_path() {
            Ok(p) => (p, false),
            // No home directory: nothing to load
            Err(_) => return Ok(Config::default()),
        },
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    parse_config(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))
}

/// Parse config YAML. An empty document is the default config.
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_saphyr::from_str(content)?;
    Ok(config)
}

impl Config {
    /// The band table this config selects. Call `validate_config` first for
    /// readable errors; this repeats the checks.
    pub fn band_table(&self) -> Result<BandTable, Vec<String>> {
        match &self.bands {
            Some(bands) => build_band_table(bands),
            None => Ok(BandTable::standard()),
        }
    }

    /// Status-bar message lifetime, falling back to 3s when unset or unparseable.
    pub fn flash_duration(&self) -> Duration {
        self.flash_duration
            .as_deref()
            .and_then(|s| humantime::parse_duration(s).ok())
            .filter(|d| !d.is_zero())
            .unwrap_or(DEFAULT_FLASH)
    }
}
