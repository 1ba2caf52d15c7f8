//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::debug_eprintln;

/// Background luma above which the terminal counts as light.
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Resolved palette choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn colors(&self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors::dark(),
            Theme::Light => ThemeColors::light(),
        }
    }
}

/// Pick the palette for `mode`. `Auto` queries the terminal background and
/// falls back to dark when the terminal does not answer.
///
/// Must run before the TUI takes over the terminal.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) => {
                debug_eprintln!("Terminal background luma: {:.2}", luma);
                theme_for_luma(luma)
            }
            Err(e) => {
                debug_eprintln!("Could not detect terminal background ({}), using dark theme", e);
                Theme::Dark
            }
        },
    }
}

fn theme_for_luma(luma: f32) -> Theme {
    if luma > LIGHT_LUMA_THRESHOLD {
        Theme::Light
    } else {
        Theme::Dark
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Result colors
    pub gain: Color,
    pub loss: Color,
    pub neutral: Color,

    // Form colors
    pub field_border: Color,
    pub field_focused: Color,
    pub field_error: Color,
    pub option_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            gain: Color::Green,
            loss: Color::Red,
            neutral: Color::White,
            field_border: Color::Blue,
            field_focused: Color::Cyan,
            field_error: Color::Red,
            option_selected: Style::new().fg(Color::Cyan).bold(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            gain: Color::Rgb(0, 128, 0),
            loss: Color::Rgb(190, 0, 0),
            neutral: Color::Black,
            field_border: Color::Rgb(59, 130, 246),
            field_focused: Color::Rgb(29, 78, 216),
            field_error: Color::Rgb(190, 0, 0),
            option_selected: Style::new().fg(Color::Rgb(29, 78, 216)).bold(),
            muted: Color::DarkGray,
            title_color: Color::Rgb(29, 78, 216),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Rgb(29, 78, 216),
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(190, 0, 0),
            popup_border: Color::Rgb(29, 78, 216),
            popup_title: Style::new().fg(Color::Rgb(29, 78, 216)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Green for gains, red for losses, plain for zero
    pub fn points_color(&self, points: i64) -> Color {
        if points > 0 {
            self.gain
        } else if points < 0 {
            self.loss
        } else {
            self.neutral
        }
    }
}
