use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

use crate::scoring::Outcome;
use crate::tui::app::{App, Focus, InputMode, RankingField};

const TITLE: &str = "Ranking Calculator";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 16 || area.width < 34 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Keep the form narrow on wide terminals
    let form_width = area.width.min(60);
    let column = Rect {
        x: area.x + (area.width - form_width) / 2,
        width: form_width,
        ..area
    };

    // Layout: Title(1) + gap + two fields(3+1 each) + outcome(4) + result(1) + fill + status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(1), // Gap
        Constraint::Length(3), // My ranking
        Constraint::Length(1), // Its error
        Constraint::Length(3), // Opponent ranking
        Constraint::Length(1), // Its error
        Constraint::Length(4), // Outcome options
        Constraint::Length(1), // Result
        Constraint::Fill(1),
        Constraint::Length(1), // Status bar
    ])
    .split(column);

    render_title(frame, chunks[0], app);
    render_field(
        frame,
        chunks[2],
        chunks[3],
        app,
        "Your ranking",
        &app.form.my_ranking,
        app.focus == Focus::MyRanking,
    );
    render_field(
        frame,
        chunks[4],
        chunks[5],
        app,
        "Opponent ranking",
        &app.form.opponent_ranking,
        app.focus == Focus::OpponentRanking,
    );
    render_outcome(frame, chunks[6], app);
    render_result(frame, chunks[7], app);
    render_status_bar(frame, Rect { x: area.x, width: area.width, ..chunks[9] }, app);

    // Render overlays based on input mode
    match app.input_mode.clone() {
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().fg(app.colors.title_color).bold(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    error_area: Rect,
    app: &App,
    label: &str,
    field: &RankingField,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(app.colors.field_focused).bold()
    } else {
        Style::default().fg(app.colors.field_border)
    };

    let block = Block::bordered()
        .title(format!(" {} ", label))
        .border_style(border);

    // Show a cursor bar in the focused field
    let text = if focused {
        format!("{}|", field.value)
    } else {
        field.value.to_string()
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if let Some(error) = field.error {
        let msg = Paragraph::new(Span::styled(
            format!("  {}", error.message()),
            Style::default().fg(app.colors.field_error),
        ));
        frame.render_widget(msg, error_area);
    }
}

fn render_outcome(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(" Did you win or lose the match? ")
        .border_style(Style::default().fg(app.colors.field_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let options = [
        (Focus::Won, Outcome::Won, "Yes, I won the match"),
        (Focus::Lost, Outcome::Lost, "No, I lost"),
    ];

    let lines: Vec<Line> = options
        .iter()
        .map(|(focus, outcome, label)| {
            let checked = app.form.outcome == *outcome;
            let radio = if checked { "(o) " } else { "( ) " };
            let mut style = if checked {
                app.colors.option_selected
            } else {
                Style::default()
            };
            if app.focus == *focus {
                style = style.reversed();
            }
            Line::from(Span::styled(format!("{}{}", radio, label), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw("Your result: ")];
    if let Some(points) = app.form.result.points() {
        spans.push(Span::styled(
            format!("{} points", app.form.result),
            Style::default().fg(app.colors.points_color(points)).bold(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            app.colors.flash_error
        } else {
            app.colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = if app.focus.is_ranking() {
            &[
                ("Tab", ":next "),
                ("0-9", ":type "),
                ("F2", ":breakdown "),
                ("F1", ":help "),
                ("Esc", ":quit"),
            ]
        } else {
            &[
                ("Tab", ":next "),
                ("Space", ":select "),
                ("F2", ":breakdown "),
                ("F1", ":help "),
                ("Esc", ":quit"),
            ]
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(app.colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border))
        .style(Style::default().bg(app.colors.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let entries = [
        ("Tab / Down     ", "Next field"),
        ("S-Tab / Up     ", "Previous field"),
        ("Left / Right   ", "Switch won/lost"),
        ("Enter / Space  ", "Select won/lost"),
        ("Backspace      ", "Delete last digit"),
        ("F2             ", "Show points table"),
        ("Ctrl-r         ", "Clear the form"),
        ("Esc / Ctrl-c   ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

/// Render the band table with the row used for the current result highlighted
fn render_breakdown_popup(frame: &mut Frame, app: &mut App) {
    let rows_len = u16::try_from(app.table.len()).unwrap_or(u16::MAX);
    // Header(1) + margin(1) + rows + gap(1) + summary(2) + borders(2)
    let popup_area = centered_rect_fixed(62, rows_len.saturating_add(7), frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Points Table ", app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border))
        .style(Style::default().bg(app.colors.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).split(inner);

    let rows: Vec<Row> = app
        .table
        .rows()
        .iter()
        .map(|band| {
            Row::new(vec![
                Cell::from(band.label()),
                Cell::from(band.unexpected_gain.to_string()),
                Cell::from(band.unexpected_loss.to_string()),
                Cell::from(band.expected_gain.to_string()),
                Cell::from(band.expected_loss.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["diff", "unexp gain", "unexp loss", "exp gain", "exp loss"])
                .style(app.colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(app.colors.row_selected);

    frame.render_stateful_widget(table, chunks[0], &mut app.breakdown_state);

    let summary = match app.resolution() {
        Some(r) => vec![
            Line::from(format!(
                "Difference {} -> band {}, {}",
                r.difference,
                r.band.label(),
                r.column.label()
            )),
            Line::from(Span::styled(
                "Esc or F2 to close",
                Style::default().fg(app.colors.muted),
            )),
        ],
        None => vec![
            Line::from("Enter both rankings and pick won/lost to see a result"),
            Line::from(Span::styled(
                "Esc or F2 to close",
                Style::default().fg(app.colors.muted),
            )),
        ],
    };
    frame.render_widget(Paragraph::new(summary), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::BandTable;
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(&terminal)
    }

    fn app() -> App {
        App::new(BandTable::standard(), ThemeColors::dark(), Duration::from_secs(3))
    }

    #[test]
    fn test_renders_form() {
        let mut app = app();
        let text = render(&mut app, 80, 24);
        assert!(text.contains("Ranking Calculator"));
        assert!(text.contains("Your ranking"));
        assert!(text.contains("Opponent ranking"));
        assert!(text.contains("Yes, I won the match"));
        assert!(text.contains("Your result:"));
    }

    #[test]
    fn test_renders_result_and_error() {
        let mut app = app();
        for c in "1000".chars() {
            app.type_char(c);
        }
        app.focus_next();
        for c in "1300".chars() {
            app.type_char(c);
        }
        app.type_char('z');
        app.set_outcome(Outcome::Won);

        let text = render(&mut app, 80, 24);
        assert!(text.contains("+22 points"));
        assert!(text.contains("enter a number"));
        assert!(text.contains("(o) Yes, I won the match"));
    }

    #[test]
    fn test_tiny_terminal() {
        let mut app = app();
        let text = render(&mut app, 20, 5);
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn test_breakdown_popup() {
        let mut app = app();
        app.show_breakdown();
        let text = render(&mut app, 80, 24);
        assert!(text.contains("Points Table"));
        assert!(text.contains("300+"));
        assert!(text.contains("Enter both rankings"));
    }

    #[test]
    fn test_breakdown_popup_with_one_band_per_difference() {
        use crate::scoring::{BandRow, DifferenceRange, MAX_RANKING};

        let rows = (0..MAX_RANKING)
            .map(|d| BandRow {
                range: DifferenceRange::Exactly(d),
                unexpected_gain: 1,
                unexpected_loss: 1,
                expected_gain: 1,
                expected_loss: 1,
            })
            .collect();
        let table = BandTable::from_rows(rows).unwrap();
        let mut app = App::new(table, ThemeColors::dark(), Duration::from_secs(3));
        app.show_breakdown();

        let text = render(&mut app, 80, 24);
        assert!(text.contains("Points Table"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = app();
        app.show_help();
        let text = render(&mut app, 80, 24);
        assert!(text.contains("Keyboard Shortcuts"));
    }
}
