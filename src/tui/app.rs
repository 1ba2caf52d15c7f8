use std::time::{Duration, Instant};

use crate::scoring::{
    resolve, resolve_detailed, validate, BandTable, InputError, Outcome, RankingValue,
    Resolution, ScoreResult,
};
use crate::tui::theme::ThemeColors;

/// Focusable elements, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    MyRanking,
    OpponentRanking,
    Won,
    Lost,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::MyRanking, Focus::OpponentRanking, Focus::Won, Focus::Lost];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_ranking(self) -> bool {
        matches!(self, Focus::MyRanking | Focus::OpponentRanking)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

/// One ranking input: the last accepted value and the error from the last keystroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingField {
    pub value: RankingValue,
    pub error: Option<InputError>,
}

impl RankingField {
    /// Validate `raw` against the current value and keep whichever wins.
    pub fn apply(&mut self, raw: &str) {
        let result = validate(raw, &self.value);
        self.value = result.value;
        self.error = result.error;
    }

    pub fn push(&mut self, c: char) {
        let mut raw = self.value.as_str().to_string();
        raw.push(c);
        self.apply(&raw);
    }

    pub fn pop(&mut self) {
        let mut raw = self.value.as_str().to_string();
        raw.pop();
        self.apply(&raw);
    }

    pub fn error_message(&self) -> String {
        self.error.map(|e| e.message()).unwrap_or_default()
    }
}

/// Everything the form holds. The scoring core never sees this; it gets the
/// current values passed in and the result is stored back here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub my_ranking: RankingField,
    pub opponent_ranking: RankingField,
    pub outcome: Outcome,
    pub result: ScoreResult,
}

impl FormState {
    /// Recompute the result from the current inputs.
    pub fn recompute(&mut self, table: &BandTable) {
        self.result = resolve(
            table,
            &self.my_ranking.value,
            &self.opponent_ranking.value,
            self.outcome,
        );
    }

    pub fn resolution(&self, table: &BandTable) -> Option<Resolution> {
        resolve_detailed(
            table,
            &self.my_ranking.value,
            &self.opponent_ranking.value,
            self.outcome,
        )
    }

    fn field_mut(&mut self, focus: Focus) -> Option<&mut RankingField> {
        match focus {
            Focus::MyRanking => Some(&mut self.my_ranking),
            Focus::OpponentRanking => Some(&mut self.opponent_ranking),
            Focus::Won | Focus::Lost => None,
        }
    }
}

pub struct App {
    pub table: BandTable,
    pub form: FormState,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub breakdown_state: ratatui::widgets::TableState,
    pub flash_message: Option<(String, Instant)>,
    pub flash_duration: Duration,
    pub colors: ThemeColors,
    pub should_quit: bool,
}

impl App {
    pub fn new(table: BandTable, colors: ThemeColors, flash_duration: Duration) -> Self {
        Self {
            table,
            form: FormState::default(),
            focus: Focus::MyRanking,
            input_mode: InputMode::Normal,
            breakdown_state: ratatui::widgets::TableState::default(),
            flash_message: None,
            flash_duration,
            colors,
            should_quit: false,
        }
    }

    /// Move focus, clearing the error of the ranking field being left.
    fn move_focus(&mut self, to: Focus) {
        if to != self.focus {
            if let Some(field) = self.form.field_mut(self.focus) {
                field.error = None;
            }
        }
        self.focus = to;
    }

    pub fn focus_next(&mut self) {
        self.move_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(self.focus.previous());
    }

    /// Left/Right between the two outcome options; no-op on ranking fields.
    pub fn toggle_outcome_focus(&mut self) {
        match self.focus {
            Focus::Won => self.move_focus(Focus::Lost),
            Focus::Lost => self.move_focus(Focus::Won),
            _ => {}
        }
    }

    /// Type a character into the focused ranking field.
    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.form.field_mut(self.focus) {
            field.push(c);
            self.form.recompute(&self.table);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.form.field_mut(self.focus) {
            field.pop();
            self.form.recompute(&self.table);
        }
    }

    /// Select the focused outcome option (Enter/Space).
    pub fn select_focused_outcome(&mut self) {
        match self.focus {
            Focus::Won => self.set_outcome(Outcome::Won),
            Focus::Lost => self.set_outcome(Outcome::Lost),
            _ => {}
        }
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.form.outcome = outcome;
        self.form.recompute(&self.table);
    }

    /// Clear every input and go back to the first field.
    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.focus = Focus::MyRanking;
        self.show_flash("Form cleared".to_string());
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.form.resolution(&self.table)
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed() >= self.flash_duration {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show the band table with the matching row selected
    pub fn show_breakdown(&mut self) {
        let selected = self.resolution().map(|r| r.band_index);
        self.breakdown_state.select(selected);
        self.input_mode = InputMode::Breakdown;
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}
