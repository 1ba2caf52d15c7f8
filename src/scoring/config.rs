use serde::{Deserialize, Serialize};

use super::bands::{BandRow, BandTable, DifferenceRange};

/// One band as written in the config file.
///
/// Example YAML:
/// ```yaml
/// bands:
///   - { range: "0", unexpected_gain: 7, unexpected_loss: 5, expected_gain: 7, expected_loss: 5 }
///   - { range: "1-24", unexpected_gain: 7, unexpected_loss: 5, expected_gain: 7, expected_loss: 5 }
///   - { range: "300+", unexpected_gain: 22, unexpected_loss: 15, expected_gain: 1, expected_loss: 2 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    /// Difference range: "N", "N-M", "N+" or ">=N"
    pub range: String,

    /// Points gained when the lower-ranked player wins
    pub unexpected_gain: u32,

    /// Points lost when the higher-ranked player loses
    pub unexpected_loss: u32,

    /// Points gained when the higher-ranked player wins
    pub expected_gain: u32,

    /// Points lost when the lower-ranked player loses
    pub expected_loss: u32,
}

impl BandConfig {
    /// Convert to a table row. Fails if the range string does not parse.
    pub fn to_row(&self) -> anyhow::Result<BandRow> {
        Ok(BandRow {
            range: DifferenceRange::parse(&self.range)?,
            unexpected_gain: self.unexpected_gain,
            unexpected_loss: self.unexpected_loss,
            expected_gain: self.expected_gain,
            expected_loss: self.expected_loss,
        })
    }
}

impl From<&BandRow> for BandConfig {
    fn from(row: &BandRow) -> Self {
        Self {
            range: row.label(),
            unexpected_gain: row.unexpected_gain,
            unexpected_loss: row.unexpected_loss,
            expected_gain: row.expected_gain,
            expected_loss: row.expected_loss,
        }
    }
}

/// The built-in table in config form, used by `init` to write it out explicitly.
pub fn default_band_configs() -> Vec<BandConfig> {
    BandTable::standard().rows().iter().map(BandConfig::from).collect()
}

/// Build the lookup table from configured bands.
/// Returns every range and coverage problem at once.
pub fn build_band_table(bands: &[BandConfig]) -> Result<BandTable, Vec<String>> {
    let mut errors = Vec::new();
    let mut rows = Vec::with_capacity(bands.len());

    for (i, band) in bands.iter().enumerate() {
        match band.to_row() {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(format!(
                "bands[{}].range: invalid '{}' - {}",
                i, band.range, e
            )),
        }
    }

    // Coverage indices only line up when every row parsed
    if !errors.is_empty() {
        return Err(errors);
    }

    BandTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_configs_roundtrip_to_table() {
        let configs = default_band_configs();
        assert_eq!(configs.len(), 8);
        assert_eq!(configs[0].range, "0");
        assert_eq!(configs[7].range, "300+");

        let table = build_band_table(&configs).unwrap();
        assert_eq!(table, BandTable::standard());
    }

    #[test]
    fn test_band_config_serde_roundtrip() {
        let configs = default_band_configs();
        let yaml = serde_saphyr::to_string(&configs).unwrap();
        let parsed: Vec<BandConfig> = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(configs, parsed);
    }

    #[test]
    fn test_band_config_parse() {
        let yaml = r#"
- range: "0-99"
  unexpected_gain: 10
  unexpected_loss: 8
  expected_gain: 10
  expected_loss: 8
- range: ">=100"
  unexpected_gain: 20
  unexpected_loss: 15
  expected_gain: 2
  expected_loss: 2
"#;
        let configs: Vec<BandConfig> = serde_saphyr::from_str(yaml).unwrap();
        let table = build_band_table(&configs).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(150).unwrap().unexpected_gain, 20);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
- range: "0+"
  unexpected_gain: 1
  unexpected_loss: 1
  expected_gain: 1
  expected_loss: 1
  bonus: 3
"#;
        let result: Result<Vec<BandConfig>, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_ranges_all_reported() {
        let mut configs = default_band_configs();
        configs[2].range = "twenty".to_string();
        configs[5].range = "".to_string();
        let errors = build_band_table(&configs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("bands[2].range"));
        assert!(errors[1].starts_with("bands[5].range"));
    }

    #[test]
    fn test_signed_range_reported_with_path() {
        let mut configs = default_band_configs();
        configs[0].range = "+0".to_string();
        let errors = build_band_table(&configs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("bands[0].range: invalid '+0'"));
    }

    #[test]
    fn test_coverage_errors_surface() {
        let mut configs = default_band_configs();
        configs.remove(3); // drop 50-74
        let errors = build_band_table(&configs).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("must start at 50")));
    }
}
