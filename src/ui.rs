//! Full-screen `ratatui` front-end: two live gauges and a reset key.

use crate::log_debug;
use crate::terminal_restore::TerminalRestoreGuard;
use crate::App;
use anyhow::Result;
use crossterm::event;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Terminal,
};
use std::io;
use std::time::Duration;

/// Configure the terminal, run the drawing loop, and tear everything down.
pub fn run_app(app: &mut App) -> Result<()> {
    let terminal_guard = TerminalRestoreGuard::new();
    terminal_guard.enable_raw_mode()?;
    let mut stdout = io::stdout();
    terminal_guard.enter_alt_screen(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app_loop(&mut terminal, app);

    drop(terminal);
    terminal_guard.restore();
    app.shutdown();

    result
}

/// Core event/render loop. Readings change every frame, so we redraw on
/// every poll tick rather than tracking dirtiness.
fn app_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw(frame, app))?;

    loop {
        app.poll_monitor();

        let mut should_quit = false;
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    should_quit = handle_key_event(app, key);
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        terminal.draw(|frame| draw(frame, app))?;

        if should_quit {
            break;
        }
    }
    Ok(())
}

/// Interpret keystrokes into commands against the shared `App` state.
fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('r') => {
            log_debug("r pressed, resetting readings");
            app.reset();
        }
        _ => {}
    }

    false
}

/// Render the title, both gauges, and the status bar.
fn draw(frame: &mut ratatui::Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.size());

    let snap = app.snapshot().rounded();
    let threshold = f64::from(app.config().threshold_db);
    let active = snap.level_percent() > threshold;

    let border_color = Color::Rgb(120, 170, 255);
    let dim_border = Color::Rgb(70, 95, 130);
    let level_color = if active { Color::Green } else { Color::Red };

    let title = Paragraph::new("Real-Time Decibel & Calorie Monitor")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(title, chunks[0]);

    let level_gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    format!(" Decibel Level: {:.2} dB ", snap.level),
                    Style::default().fg(level_color).add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(level_color))
        .ratio(snap.level_percent() / 100.0);
    frame.render_widget(level_gauge, chunks[1]);

    let calorie_gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(
                    format!(" Calories Burnt: {:.2} ", snap.calories),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(snap.calories_percent() / 100.0);
    frame.render_widget(calorie_gauge, chunks[2]);

    let status = Paragraph::new(app.status_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(dim_border))
                .title(Span::styled(
                    " r reset | q quit ",
                    Style::default().fg(dim_border),
                )),
        )
        .style(Style::default().fg(Color::Rgb(160, 160, 160)));
    frame.render_widget(status, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use clap::Parser;

    fn test_app() -> App {
        App::new(AppConfig::parse_from(["test-app"]))
    }

    #[test]
    fn quit_keys_exit_the_loop() {
        let mut app = test_app();
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty()),
        ));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()),
        ));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ));
    }

    #[test]
    fn reset_key_does_not_quit() {
        let mut app = test_app();
        assert!(!handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::empty()),
        ));
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut app = test_app();
        assert!(!handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty()),
        ));
    }
}
