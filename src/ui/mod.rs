//! UI rendering module for incomeview
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod filter_panel;
pub mod help_overlay;
pub mod icons;
pub mod revenue_chart;
pub mod statement_table;

pub use help_overlay::render as render_help_overlay;
pub use icons::Icon;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};

/// Width of the filter panel column
const FILTER_PANEL_WIDTH: u16 = 32;

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Ticker input
            Constraint::Min(8),     // Filters and table
            Constraint::Length(10), // Revenue chart
            Constraint::Length(1),  // Help text
        ])
        .split(area);

    statement_table::render_ticker_bar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FILTER_PANEL_WIDTH), Constraint::Min(40)])
        .split(chunks[1]);

    filter_panel::render(frame, app, body[0]);
    statement_table::render(frame, app, body[1]);
    revenue_chart::render(frame, app, chunks[2]);
    render_help(frame, app, chunks[3]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Renders the key hints and data freshness line
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Normal => "t: ticker  f: filter  c: reset  1-6: sort  p: period  r: reload  ?: help  q: quit",
        InputMode::Ticker => "Enter: load ticker  Esc: cancel",
        InputMode::Filter => "Tab/↑/↓: move  Enter: update filter  Esc: done",
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("  Updated {}", refreshed.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::StatementFetcher;
    use crate::data::{IncomeStatementClient, Period};
    use chrono::Duration;
    use ratatui::{backend::TestBackend, Terminal};

    fn offline_app() -> App {
        let client = IncomeStatementClient::with_base_url("http://127.0.0.1:9", "key");
        App::with_fetcher("AAPL", Period::Annual, StatementFetcher::new(client, Duration::minutes(60)))
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_loading_screen() {
        let app = offline_app();
        let content = render_to_string(&app);

        assert!(content.contains("Loading..."), "Should show loading state");
        assert!(content.contains("AAPL"), "Should show the ticker input");
        assert!(content.contains("Filter by Date"), "Should show filter panel");
    }

    #[test]
    fn test_render_with_help_overlay() {
        let mut app = offline_app();
        app.show_help = true;
        let content = render_to_string(&app);

        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_footer_changes_with_input_mode() {
        let mut app = offline_app();
        app.input_mode = InputMode::Ticker;
        let content = render_to_string(&app);

        assert!(content.contains("Enter: load ticker"));
    }
}
