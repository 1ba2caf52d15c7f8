use crate::config::Config;

use super::config::build_band_table;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref bands) = config.bands {
        if let Err(band_errors) = build_band_table(bands) {
            errors.extend(band_errors);
        }
    }

    if let Some(ref flash) = config.flash_duration {
        match humantime::parse_duration(flash) {
            Ok(d) if d.is_zero() => {
                errors.push("flash_duration: must be longer than zero".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("flash_duration: invalid '{}' - {}", flash, e)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
