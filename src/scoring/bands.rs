use anyhow::{bail, Result};
use std::fmt;

use super::ranking::MAX_RANKING;

/// One bound of a range: plain ASCII digits only (no sign).
fn parse_bound(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        bail!("'{}' is not a plain number", s);
    }
    Ok(s.parse()?)
}

/// Inclusive range of ranking differences covered by one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceRange {
    Exactly(u32),
    Between(u32, u32), // Inclusive: N-M
    AtLeast(u32),      // Unbounded: N+
}

impl DifferenceRange {
    /// Parse "N", "N-M", "N+" or ">=N".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("range is empty");
        }
        if let Some(val) = s.strip_prefix(">=") {
            Ok(DifferenceRange::AtLeast(parse_bound(val)?))
        } else if let Some(val) = s.strip_suffix('+') {
            Ok(DifferenceRange::AtLeast(parse_bound(val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 2 {
                bail!("Invalid range format: {}", s);
            }
            let low = parse_bound(parts[0])?;
            let high = parse_bound(parts[1])?;
            if low > high {
                bail!("lower bound {} is above upper bound {}", low, high);
            }
            Ok(DifferenceRange::Between(low, high))
        } else {
            Ok(DifferenceRange::Exactly(parse_bound(s)?))
        }
    }

    pub fn min(&self) -> u32 {
        match *self {
            DifferenceRange::Exactly(n) | DifferenceRange::AtLeast(n) => n,
            DifferenceRange::Between(low, _) => low,
        }
    }

    /// Upper bound, `None` when unbounded.
    pub fn max(&self) -> Option<u32> {
        match *self {
            DifferenceRange::Exactly(n) => Some(n),
            DifferenceRange::Between(_, high) => Some(high),
            DifferenceRange::AtLeast(_) => None,
        }
    }

    pub fn contains(&self, difference: u32) -> bool {
        match self.max() {
            Some(max) => difference >= self.min() && difference <= max,
            None => difference >= self.min(),
        }
    }
}

impl fmt::Display for DifferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceRange::Exactly(n) => write!(f, "{}", n),
            DifferenceRange::Between(low, high) => write!(f, "{}-{}", low, high),
            DifferenceRange::AtLeast(n) => write!(f, "{}+", n),
        }
    }
}

/// One row of the lookup table: a difference range and the four point magnitudes.
///
/// "Unexpected" columns apply when the result goes against the rankings
/// (underdog wins, favorite loses); "expected" columns when it follows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandRow {
    pub range: DifferenceRange,
    pub unexpected_gain: u32,
    pub unexpected_loss: u32,
    pub expected_gain: u32,
    pub expected_loss: u32,
}

impl BandRow {
    const fn new(
        range: DifferenceRange,
        unexpected_gain: u32,
        unexpected_loss: u32,
        expected_gain: u32,
        expected_loss: u32,
    ) -> Self {
        Self {
            range,
            unexpected_gain,
            unexpected_loss,
            expected_gain,
            expected_loss,
        }
    }

    pub fn label(&self) -> String {
        self.range.to_string()
    }
}

const STANDARD_BANDS: [BandRow; 8] = [
    BandRow::new(DifferenceRange::Exactly(0), 7, 5, 7, 5),
    BandRow::new(DifferenceRange::Between(1, 24), 7, 5, 7, 5),
    BandRow::new(DifferenceRange::Between(25, 49), 12, 10, 6, 4),
    BandRow::new(DifferenceRange::Between(50, 74), 16, 14, 5, 3),
    BandRow::new(DifferenceRange::Between(75, 99), 19, 17, 4, 3),
    BandRow::new(DifferenceRange::Between(100, 199), 22, 20, 3, 3),
    BandRow::new(DifferenceRange::Between(200, 299), 22, 18, 2, 2),
    BandRow::new(DifferenceRange::AtLeast(300), 22, 15, 1, 2),
];

/// Ordered, contiguous set of bands covering every difference below `MAX_RANKING`.
///
/// Built once at startup and only read afterwards. Tables loaded from config
/// must pass [`check_coverage`] first; see `scoring::validation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTable {
    rows: Vec<BandRow>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl BandTable {
    /// The built-in eight-band table.
    pub fn standard() -> Self {
        Self {
            rows: STANDARD_BANDS.to_vec(),
        }
    }

    /// Build a table from rows, checking coverage.
    pub fn from_rows(rows: Vec<BandRow>) -> Result<Self, Vec<String>> {
        check_coverage(&rows)?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[BandRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First band containing `difference`. Linear scan; the table is tiny.
    pub fn find(&self, difference: u32) -> Option<&BandRow> {
        self.rows.iter().find(|row| row.range.contains(difference))
    }

    /// Index of the band containing `difference`.
    pub fn position(&self, difference: u32) -> Option<usize> {
        self.rows.iter().position(|row| row.range.contains(difference))
    }
}

/// Check that `rows` are contiguous, non-overlapping and cover `[0, MAX_RANKING)`.
/// Returns all problems found, indexed by row.
pub fn check_coverage(rows: &[BandRow]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if rows.is_empty() {
        errors.push("bands: at least one band is required".to_string());
        return Err(errors);
    }

    // Next difference the table still has to cover; None once a band is unbounded
    let mut expected_start = Some(0u32);
    for (i, row) in rows.iter().enumerate() {
        match expected_start {
            None => {
                errors.push(format!(
                    "bands[{}].range: '{}' follows an unbounded band",
                    i, row.range
                ));
                continue;
            }
            Some(start) if row.range.min() != start => {
                errors.push(format!(
                    "bands[{}].range: '{}' must start at {}",
                    i, row.range, start
                ));
            }
            Some(_) => {}
        }
        expected_start = row.range.max().map(|max| max.saturating_add(1));
    }

    if let Some(last) = rows.last() {
        if let Some(max) = last.range.max() {
            if max < MAX_RANKING - 1 {
                errors.push(format!(
                    "bands[{}].range: '{}' leaves differences {}-{} uncovered",
                    rows.len() - 1,
                    last.range,
                    max + 1,
                    MAX_RANKING - 1
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        let range = DifferenceRange::parse("0").unwrap();
        assert_eq!(range, DifferenceRange::Exactly(0));
        assert!(range.contains(0));
        assert!(!range.contains(1));
    }

    #[test]
    fn test_parse_between() {
        let range = DifferenceRange::parse("25-49").unwrap();
        assert!(!range.contains(24));
        assert!(range.contains(25));
        assert!(range.contains(49));
        assert!(!range.contains(50));
    }

    #[test]
    fn test_parse_unbounded_forms() {
        assert_eq!(
            DifferenceRange::parse("300+").unwrap(),
            DifferenceRange::AtLeast(300)
        );
        assert_eq!(
            DifferenceRange::parse(">= 300").unwrap(),
            DifferenceRange::AtLeast(300)
        );
        assert!(DifferenceRange::AtLeast(300).contains(9999));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DifferenceRange::parse("").is_err());
        assert!(DifferenceRange::parse("abc").is_err());
        assert!(DifferenceRange::parse("1-2-3").is_err());
        assert!(DifferenceRange::parse("-5").is_err());
        assert!(DifferenceRange::parse("50-10").is_err());
    }

    #[test]
    fn test_parse_rejects_signed_bounds() {
        assert!(DifferenceRange::parse("+5").is_err());
        assert!(DifferenceRange::parse("+0-+24").is_err());
        assert!(DifferenceRange::parse("0-+24").is_err());
        assert!(DifferenceRange::parse(">=+300").is_err());
        assert!(DifferenceRange::parse("+300+").is_err());
        assert!(DifferenceRange::parse("+").is_err());
    }

    #[test]
    fn test_display_matches_parse_input() {
        for label in ["0", "1-24", "300+"] {
            assert_eq!(DifferenceRange::parse(label).unwrap().to_string(), label);
        }
    }

    #[test]
    fn test_standard_table_values() {
        let table = BandTable::standard();
        assert_eq!(table.len(), 8);

        let labels: Vec<String> = table.rows().iter().map(BandRow::label).collect();
        assert_eq!(
            labels,
            vec!["0", "1-24", "25-49", "50-74", "75-99", "100-199", "200-299", "300+"]
        );

        let row = table.find(60).unwrap();
        assert_eq!(
            (row.unexpected_gain, row.unexpected_loss, row.expected_gain, row.expected_loss),
            (16, 14, 5, 3)
        );

        let last = table.find(300).unwrap();
        assert_eq!(
            (last.unexpected_gain, last.unexpected_loss, last.expected_gain, last.expected_loss),
            (22, 15, 1, 2)
        );
    }

    #[test]
    fn test_every_difference_matches_exactly_one_band() {
        let table = BandTable::standard();
        for d in 0..MAX_RANKING {
            let matches = table.rows().iter().filter(|r| r.range.contains(d)).count();
            assert_eq!(matches, 1, "difference {} matched {} bands", d, matches);
        }
    }

    #[test]
    fn test_band_edges() {
        let table = BandTable::standard();
        assert_eq!(table.position(0), Some(0));
        assert_eq!(table.position(1), Some(1));
        assert_eq!(table.position(24), Some(1));
        assert_eq!(table.position(25), Some(2));
        assert_eq!(table.position(199), Some(5));
        assert_eq!(table.position(200), Some(6));
        assert_eq!(table.position(299), Some(6));
        assert_eq!(table.position(300), Some(7));
        assert_eq!(table.position(MAX_RANKING - 1), Some(7));
    }

    #[test]
    fn test_standard_table_passes_coverage() {
        assert!(check_coverage(BandTable::standard().rows()).is_ok());
    }

    #[test]
    fn test_coverage_gap_detected() {
        let rows = vec![
            BandRow::new(DifferenceRange::Between(0, 10), 1, 1, 1, 1),
            BandRow::new(DifferenceRange::AtLeast(20), 1, 1, 1, 1),
        ];
        let errors = check_coverage(&rows).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("bands[1].range"));
        assert!(errors[0].contains("must start at 11"));
    }

    #[test]
    fn test_coverage_must_start_at_zero() {
        let rows = vec![BandRow::new(DifferenceRange::AtLeast(1), 1, 1, 1, 1)];
        let errors = check_coverage(&rows).unwrap_err();
        assert!(errors[0].contains("must start at 0"));
    }

    #[test]
    fn test_coverage_short_last_band() {
        let rows = vec![BandRow::new(DifferenceRange::Between(0, 500), 1, 1, 1, 1)];
        let errors = check_coverage(&rows).unwrap_err();
        assert!(errors[0].contains("501-9999"));
    }

    #[test]
    fn test_coverage_band_after_unbounded() {
        let rows = vec![
            BandRow::new(DifferenceRange::AtLeast(0), 1, 1, 1, 1),
            BandRow::new(DifferenceRange::Exactly(5), 1, 1, 1, 1),
        ];
        let errors = check_coverage(&rows).unwrap_err();
        assert!(errors[0].contains("follows an unbounded band"));
    }

    #[test]
    fn test_coverage_empty() {
        assert!(check_coverage(&[]).is_err());
        assert!(BandTable::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_bounded_last_band_reaching_limit_is_fine() {
        let rows = vec![BandRow::new(
            DifferenceRange::Between(0, MAX_RANKING - 1),
            1,
            1,
            1,
            1,
        )];
        assert!(BandTable::from_rows(rows).is_ok());
    }
}
