use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

use crate::scoring::{
    BandTable, Column, Outcome, Resolution, ScoreResult, Side, ValidationResult,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a result as "+7 points" / "-15 points" / "0 points", or "" while empty.
/// Gains are green, losses red.
pub fn format_result(result: &ScoreResult, use_colors: bool) -> String {
    let points = match result.points() {
        Some(p) => p,
        None => return String::new(),
    };
    let text = format!("{} points", result);

    if !use_colors {
        return text;
    }
    if points > 0 {
        text.green().bold().to_string()
    } else if points < 0 {
        text.red().bold().to_string()
    } else {
        text.bold().to_string()
    }
}

/// Multi-line explanation of how a result was reached (for verbose mode)
pub fn format_breakdown(resolution: &Resolution, use_colors: bool) -> String {
    let side = match resolution.side {
        Side::Underdog => "underdog (lower ranking)",
        Side::Favorite if resolution.my_ranking == resolution.opponent_ranking => {
            "even (equal rankings)"
        }
        Side::Favorite => "favorite (higher ranking)",
    };
    let band = resolution.band.label();
    let column = resolution.column.label();

    if use_colors {
        format!(
            "  Rankings: {} vs {}\n  Difference: {}\n  Band: {}\n  You are: {}\n  Column: {}",
            resolution.my_ranking.bold(),
            resolution.opponent_ranking.bold(),
            resolution.difference,
            band.cyan(),
            side,
            column.yellow()
        )
    } else {
        format!(
            "  Rankings: {} vs {}\n  Difference: {}\n  Band: {}\n  You are: {}\n  Column: {}",
            resolution.my_ranking,
            resolution.opponent_ranking,
            resolution.difference,
            band,
            side,
            column
        )
    }
}

const TABLE_HEADERS: [&str; 5] = ["difference", "unexp. gain", "unexp. loss", "exp. gain", "exp. loss"];

/// Format the band table with a header row, optionally marking one row
pub fn format_band_table(table: &BandTable, highlight: Option<usize>, use_colors: bool) -> String {
    let range_width = table
        .rows()
        .iter()
        .map(|r| r.label().len())
        .chain(std::iter::once(TABLE_HEADERS[0].len()))
        .max()
        .unwrap_or(0);
    let num_width = TABLE_HEADERS[1..].iter().map(|h| h.len()).max().unwrap_or(0);

    let header = format!(
        "  {:<rw$}  {:>nw$}  {:>nw$}  {:>nw$}  {:>nw$}",
        TABLE_HEADERS[0],
        TABLE_HEADERS[1],
        TABLE_HEADERS[2],
        TABLE_HEADERS[3],
        TABLE_HEADERS[4],
        rw = range_width,
        nw = num_width
    );

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (idx, row) in table.rows().iter().enumerate() {
        let marker = if highlight == Some(idx) { '>' } else { ' ' };
        let line = format!(
            "{} {:<rw$}  {:>nw$}  {:>nw$}  {:>nw$}  {:>nw$}",
            marker,
            row.label(),
            row.unexpected_gain,
            row.unexpected_loss,
            row.expected_gain,
            row.expected_loss,
            rw = range_width,
            nw = num_width
        );
        if use_colors && highlight == Some(idx) {
            lines.push(line.reversed().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// Format the band table as tab-separated values for scripting
/// Columns: range, unexpected_gain, unexpected_loss, expected_gain, expected_loss (no headers)
pub fn format_tsv(table: &BandTable) -> String {
    table
        .rows()
        .iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                row.label(),
                row.unexpected_gain,
                row.unexpected_loss,
                row.expected_gain,
                row.expected_loss
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a validation result: the kept value, plus the message when rejected
pub fn format_validation(result: &ValidationResult, use_colors: bool) -> String {
    let value = if result.value.is_empty() {
        "(empty)".to_string()
    } else {
        result.value.to_string()
    };

    match result.error {
        None => format!("value: {}", value),
        Some(_) if use_colors => {
            format!("value: {}\nerror: {}", value, result.message().red())
        }
        Some(_) => format!("value: {}\nerror: {}", value, result.message()),
    }
}

/// Machine-readable result of `calc`
#[derive(Debug, Serialize)]
pub struct CalcReport {
    pub my_ranking: u32,
    pub opponent_ranking: u32,
    pub outcome: Outcome,
    pub difference: u32,
    pub band: String,
    pub side: Side,
    pub column: Column,
    pub points: i64,
    pub result: String,
}

impl From<&Resolution> for CalcReport {
    fn from(r: &Resolution) -> Self {
        Self {
            my_ranking: r.my_ranking,
            opponent_ranking: r.opponent_ranking,
            outcome: r.outcome,
            difference: r.difference,
            band: r.band.label(),
            side: r.side,
            column: r.column,
            points: r.result.points().unwrap_or(0),
            result: r.result.to_string(),
        }
    }
}

/// Machine-readable result of `validate`
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub value: String,
    pub error: String,
}

impl From<&ValidationResult> for ValidationReport {
    fn from(r: &ValidationResult) -> Self {
        Self {
            value: r.value.to_string(),
            error: r.message(),
        }
    }
}

/// Pretty JSON for any report
pub fn format_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{resolve_detailed, validate, RankingValue};

    fn resolution(my: &str, opponent: &str, outcome: Outcome) -> Resolution {
        resolve_detailed(
            &BandTable::standard(),
            &RankingValue::parse(my).unwrap(),
            &RankingValue::parse(opponent).unwrap(),
            outcome,
        )
        .unwrap()
    }

    #[test]
    fn test_format_result_plain() {
        assert_eq!(format_result(&ScoreResult::Points(7), false), "+7 points");
        assert_eq!(format_result(&ScoreResult::Points(-15), false), "-15 points");
        assert_eq!(format_result(&ScoreResult::Points(0), false), "0 points");
        assert_eq!(format_result(&ScoreResult::Empty, false), "");
    }

    #[test]
    fn test_format_result_colored_keeps_text() {
        let colored = format_result(&ScoreResult::Points(22), true);
        assert!(colored.contains("+22 points"));
        assert!(colored.contains("\x1b["));
    }

    #[test]
    fn test_format_breakdown() {
        let text = format_breakdown(&resolution("1000", "1300", Outcome::Won), false);
        assert!(text.contains("Rankings: 1000 vs 1300"));
        assert!(text.contains("Difference: 300"));
        assert!(text.contains("Band: 300+"));
        assert!(text.contains("underdog"));
        assert!(text.contains("unexpected gain"));
    }

    #[test]
    fn test_format_breakdown_even() {
        let text = format_breakdown(&resolution("1000", "1000", Outcome::Won), false);
        assert!(text.contains("even (equal rankings)"));
        assert!(text.contains("expected gain"));
    }

    #[test]
    fn test_format_band_table() {
        let result = format_band_table(&BandTable::standard(), Some(2), false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains("difference"));
        assert!(lines[1].starts_with("  0 "));
        assert!(lines[3].starts_with("> 25-49"));
        assert!(lines[8].contains("300+"));
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&BandTable::standard());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "0\t7\t5\t7\t5");
        assert_eq!(lines[7], "300+\t22\t15\t1\t2");
    }

    #[test]
    fn test_format_validation() {
        let ok = validate("123", &RankingValue::empty());
        assert_eq!(format_validation(&ok, false), "value: 123");

        let bad = validate("12a", &RankingValue::parse("12").unwrap());
        assert_eq!(format_validation(&bad, false), "value: 12\nerror: enter a number");

        let empty = validate("x", &RankingValue::empty());
        assert!(format_validation(&empty, false).starts_with("value: (empty)"));
    }

    #[test]
    fn test_format_json_report() {
        let report = CalcReport::from(&resolution("1300", "1000", Outcome::Lost));
        let json = format_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"], "-15");
        assert_eq!(value["points"], -15);
        assert_eq!(value["band"], "300+");
        assert_eq!(value["side"], "favorite");
        assert_eq!(value["column"], "unexpected_loss");
        assert_eq!(value["outcome"], "lost");
    }

    #[test]
    fn test_validation_report_json() {
        let result = validate("10000", &RankingValue::parse("1000").unwrap());
        let json = format_json(&ValidationReport::from(&result)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["value"], "1000");
        assert_eq!(value["error"], "value must be below 10000");
    }
}
