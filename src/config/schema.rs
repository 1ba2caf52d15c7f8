use serde::{Deserialize, Serialize};

use crate::scoring::BandConfig;

/// Terminal palette selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Ask the terminal for its background colour
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeMode,

    /// How long status-bar messages stay up, e.g. "3s" (default: 3s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_duration: Option<String>,

    /// Replaces the built-in band table when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<Vec<BandConfig>>,
}
