pub mod bands;
pub mod config;
pub mod engine;
pub mod ranking;
pub mod validation;

pub use bands::{BandRow, BandTable, DifferenceRange};
pub use config::{build_band_table, default_band_configs, BandConfig};
pub use engine::{resolve, resolve_detailed, Column, Outcome, Resolution, ScoreResult, Side};
pub use ranking::{validate, InputError, RankingValue, ValidationResult, MAX_RANKING};
pub use validation::validate_config;
