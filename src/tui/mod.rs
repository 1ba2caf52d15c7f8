pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::{App, FormState};
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::scoring::Outcome;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Hold stderr while the TUI is active so output does not corrupt the display
    crate::diagnostics::hold();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            Some(Event::Resize) => {}
            None => {
                crate::buffered_eprintln!("Terminal input closed, exiting");
                app.should_quit = true;
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush held messages now that the terminal is restored
    for msg in crate::diagnostics::release() {
        eprintln!("{}", msg);
    }

    result
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Quit from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Esc => app.should_quit = true,

            // Navigation
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Left | KeyCode::Right => app.toggle_outcome_focus(),

            // Overlays
            KeyCode::F(1) => app.show_help(),
            KeyCode::F(2) => app.show_breakdown(),

            // Reset
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.reset(),

            // Outcome selection
            KeyCode::Enter | KeyCode::Char(' ') if !app.focus.is_ranking() => {
                app.select_focused_outcome();
            }
            KeyCode::Enter => app.focus_next(),

            // Outcome shortcuts when an option has focus
            KeyCode::Char('w') if !app.focus.is_ranking() => app.set_outcome(Outcome::Won),
            KeyCode::Char('l') if !app.focus.is_ranking() => app.set_outcome(Outcome::Lost),

            // Field editing; every character goes through validation
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.type_char(c)
            }

            _ => {}
        },
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::F(2) => app.dismiss_breakdown(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
