use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::bands::{BandRow, BandTable};
use super::ranking::RankingValue;

/// What the player reports for the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Unset,
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Unset => "",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    /// Accepts "won"/"lost"/"" as well as the form values "1"/"0".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(Outcome::Unset),
            "won" | "win" | "w" | "1" => Ok(Outcome::Won),
            "lost" | "loss" | "l" | "0" => Ok(Outcome::Lost),
            other => Err(format!("expected 'won' or 'lost', got '{}'", other)),
        }
    }
}

/// Which player the rankings favour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Lower ranking than the opponent.
    Underdog,
    /// Higher or equal ranking.
    Favorite,
}

/// Table column a result was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    UnexpectedGain,
    UnexpectedLoss,
    ExpectedGain,
    ExpectedLoss,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::UnexpectedGain => "unexpected gain",
            Column::UnexpectedLoss => "unexpected loss",
            Column::ExpectedGain => "expected gain",
            Column::ExpectedLoss => "expected loss",
        }
    }

    fn read(&self, row: &BandRow) -> u32 {
        match self {
            Column::UnexpectedGain => row.unexpected_gain,
            Column::UnexpectedLoss => row.unexpected_loss,
            Column::ExpectedGain => row.expected_gain,
            Column::ExpectedLoss => row.expected_loss,
        }
    }
}

/// Signed point delta, or nothing while the form is incomplete.
///
/// Displays as `""`, `"0"`, `"+7"` or `"-15"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreResult {
    #[default]
    Empty,
    Points(i64),
}

impl ScoreResult {
    pub fn points(&self) -> Option<i64> {
        match self {
            ScoreResult::Empty => None,
            ScoreResult::Points(p) => Some(*p),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScoreResult::Empty)
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreResult::Empty => Ok(()),
            ScoreResult::Points(0) => f.write_str("0"),
            ScoreResult::Points(p) => write!(f, "{:+}", p),
        }
    }
}

/// Everything that went into one result, for breakdown displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub my_ranking: u32,
    pub opponent_ranking: u32,
    pub outcome: Outcome,
    pub difference: u32,
    pub band_index: usize,
    pub band: BandRow,
    pub side: Side,
    pub column: Column,
    pub result: ScoreResult,
}

/// Resolve with full detail. `None` while any input is unset.
pub fn resolve_detailed(
    table: &BandTable,
    my_ranking: &RankingValue,
    opponent_ranking: &RankingValue,
    outcome: Outcome,
) -> Option<Resolution> {
    let my = my_ranking.magnitude()?;
    let opponent = opponent_ranking.magnitude()?;
    let won = match outcome {
        Outcome::Unset => return None,
        Outcome::Won => true,
        Outcome::Lost => false,
    };

    let difference = my.abs_diff(opponent);
    let band_index = table.position(difference)?;
    let band = table.rows()[band_index].clone();

    let side = if my < opponent {
        Side::Underdog
    } else {
        Side::Favorite
    };

    let column = match (won, side) {
        (true, Side::Underdog) => Column::UnexpectedGain,
        (true, Side::Favorite) => Column::ExpectedGain,
        (false, Side::Underdog) => Column::ExpectedLoss,
        (false, Side::Favorite) => Column::UnexpectedLoss,
    };

    let magnitude = i64::from(column.read(&band));
    let result = ScoreResult::Points(if won { magnitude } else { -magnitude });

    Some(Resolution {
        my_ranking: my,
        opponent_ranking: opponent,
        outcome,
        difference,
        band_index,
        band,
        side,
        column,
        result,
    })
}

/// Point delta for the match, [`ScoreResult::Empty`] until all three inputs are set.
pub fn resolve(
    table: &BandTable,
    my_ranking: &RankingValue,
    opponent_ranking: &RankingValue,
    outcome: Outcome,
) -> ScoreResult {
    resolve_detailed(table, my_ranking, opponent_ranking, outcome)
        .map(|r| r.result)
        .unwrap_or_default()
}
