//! Filter panel rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Icon;
use crate::app::{App, FilterInput, InputMode};
use crate::format::filtered_count_label;

/// Section headings, each followed by its (lower, upper) inputs
const SECTIONS: [(&str, FilterInput, FilterInput); 3] = [
    ("Filter by Date:", FilterInput::DateFrom, FilterInput::DateTo),
    (
        "Filter by Revenue:",
        FilterInput::RevenueMin,
        FilterInput::RevenueMax,
    ),
    (
        "Filter by Net Income:",
        FilterInput::NetIncomeMin,
        FilterInput::NetIncomeMax,
    ),
];

fn input_line(app: &App, input: FilterInput) -> Line<'static> {
    let editing = app.input_mode == InputMode::Filter;
    let focused = editing && app.filter_focus == input;
    let value = app.filter_inputs.get(input);

    let value_span = if value.is_empty() && !focused {
        Span::styled(
            placeholder(input).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if focused {
        Span::styled(
            format!("{}_", value),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::White))
    };

    let marker = if focused { "\u{25B8} " } else { "  " }; // ▸
    Line::from(vec![Span::raw(marker), value_span])
}

fn placeholder(input: FilterInput) -> &'static str {
    match input {
        FilterInput::DateFrom | FilterInput::DateTo => "All dates",
        other => other.label(),
    }
}

/// Renders the filter inputs, the hidden-count line and the action hints
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Filter;
    let mut lines: Vec<Line> = Vec::new();

    for (heading, lower, upper) in SECTIONS {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(input_line(app, lower));
        lines.push(input_line(app, upper));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(filtered_count_label(app.hidden_count())));

    if editing {
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Update Filter "),
            Span::styled(Icon::Filter.glyph(), Style::default().fg(Color::Cyan)),
        ]));
    } else if app.hidden_count() != 0 {
        lines.push(Line::from(Span::styled(
            "c: Reset filters?",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )));
    }

    if let Some(message) = &app.status_message {
        if editing {
            lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let border_color = if editing { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
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

    fn render_panel(app: &App) -> String {
        let backend = TestBackend::new(32, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, app, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_panel_shows_placeholders() {
        let app = offline_app();
        let content = render_panel(&app);

        assert!(content.contains("Filter by Date:"));
        assert!(content.contains("All dates"));
        assert!(content.contains("Lower Revenue"));
        assert!(content.contains("Filtering 0 statements"));
    }

    #[test]
    fn test_panel_shows_draft_values_and_hint_when_editing() {
        let mut app = offline_app();
        app.input_mode = InputMode::Filter;
        app.filter_focus = FilterInput::RevenueMin;
        app.filter_inputs.set(FilterInput::RevenueMin, "5000");

        let content = render_panel(&app);

        assert!(content.contains("5000_"));
        assert!(content.contains("Update Filter"));
    }

    #[test]
    fn test_panel_shows_input_error_while_editing() {
        let mut app = offline_app();
        app.input_mode = InputMode::Filter;
        app.status_message = Some("Invalid amount: 'x'".to_string());

        let content = render_panel(&app);

        assert!(content.contains("Invalid amount"));
    }
}
