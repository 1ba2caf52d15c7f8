use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, ThemeMode};
use crate::scoring::default_band_configs;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    Ok(parse_yes_no(&input, default_yes))
}

fn parse_yes_no(input: &str, default_yes: bool) -> bool {
    let input = input.to_lowercase();
    if input.is_empty() {
        default_yes
    } else {
        input == "y" || input == "yes"
    }
}

fn parse_theme(input: &str) -> Option<ThemeMode> {
    match input.trim().to_lowercase().as_str() {
        "auto" => Some(ThemeMode::Auto),
        "dark" => Some(ThemeMode::Dark),
        "light" => Some(ThemeMode::Light),
        _ => None,
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("rank-delta configuration");
    println!("========================");
    println!();

    // 1. Theme
    println!("The calculator screen has a dark and a light palette. 'auto' asks the terminal.");
    let theme = loop {
        let input = prompt_with_default("Theme (auto/dark/light)", "auto")?;
        match parse_theme(&input) {
            Some(t) => break t,
            None => println!("  Invalid: pick auto, dark or light. Try again."),
        }
    };

    // 2. Flash duration
    println!();
    println!("Status messages disappear after a while (e.g. '3s', '1500ms').");
    let flash_duration = loop {
        let input = prompt_with_default("Message duration", "3s")?;
        match humantime::parse_duration(&input) {
            Ok(d) if !d.is_zero() => break input,
            Ok(_) => println!("  Invalid: must be longer than zero. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 3. Band table
    println!();
    println!("The standard points table is built in. Writing it out lets you edit it later.");
    let write_bands = prompt_yes_no("Write the points table into the config?", false)?;
    let bands = write_bands.then(default_band_configs);

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        theme,
        flash_duration: Some(flash_duration),
        bands,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `rank-delta` to get started.");

    Ok(())
}

/// Serialize `config` to YAML and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
