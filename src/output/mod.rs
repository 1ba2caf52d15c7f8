pub mod formatter;

pub use formatter::{
    format_band_table, format_breakdown, format_json, format_result, format_tsv,
    format_validation, should_use_colors, CalcReport, ValidationReport,
};
