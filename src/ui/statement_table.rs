//! Statements table rendering
//!
//! Renders the ticker input and the income-statement table, or the loading,
//! error and empty states in its place.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::Icon;
use crate::app::{App, InputMode, LoadState};
use crate::data::{FinancialStatement, Period, StatementField};
use crate::format::{format_eps, format_large_number};
use crate::pipeline::{SortKey, TableOutcome};

/// Placeholder rows drawn while loading
const PLACEHOLDER_ROWS: usize = 5;

const BORDER_COLOR: Color = Color::DarkGray;

/// Renders the ticker input line
pub fn render_ticker_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Ticker;
    let (input_style, border_style) = if editing {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default().fg(Color::White), Style::default().fg(BORDER_COLOR))
    };

    let cursor = if editing { "_" } else { "" };
    let mut spans = vec![
        Span::styled(format!("{}{}", app.ticker_input, cursor), input_style),
        Span::raw(" "),
        Span::styled(Icon::ArrowBigRight.glyph(), Style::default().fg(Color::Cyan)),
    ];
    if let Some(message) = &app.status_message {
        if editing {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(message.clone(), Style::default().fg(Color::Red)));
        }
    }

    let block = Block::default()
        .title(" Enter stock ticker ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Title above the table
fn table_title(ticker: &str, period: Period) -> String {
    match period {
        Period::Annual => format!(" {} Income Statement Overview ", ticker),
        Period::Quarter => format!(" {} Income Statement Overview (Quarterly) ", ticker),
    }
}

/// Header text for a column, with its shortcut and the sort marker if active
fn header_label(position: usize, field: StatementField, sort_key: SortKey) -> String {
    if sort_key.field == field {
        format!(
            "{} {} {}",
            position,
            field.title(),
            Icon::for_direction(sort_key.direction).glyph()
        )
    } else {
        format!("{} {}", position, field.title())
    }
}

fn header_row(sort_key: SortKey) -> Row<'static> {
    let cells = StatementField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| Cell::from(header_label(i + 1, *field, sort_key)));
    Row::new(cells).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Display text for every column of a statement
fn row_cells(statement: &FinancialStatement) -> [String; 6] {
    [
        statement.date.to_string(),
        format_large_number(statement.revenue),
        format_large_number(statement.net_income),
        format_large_number(statement.gross_profit),
        format_eps(statement.eps),
        format_large_number(statement.operating_income),
    ]
}

fn column_widths() -> [Constraint; 6] {
    [Constraint::Ratio(1, 6); 6]
}

/// Renders the statements table or the message that replaces it
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(table_title(&app.ticker, app.period))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_COLOR));

    match &app.load_state {
        LoadState::Loading => render_loading(frame, app.sort_key, block, area),
        LoadState::Failed(message) => {
            render_message(frame, block, area, message, Color::Red);
        }
        LoadState::Loaded(_) => match app.view.as_ref().map(|view| &view.outcome) {
            Some(TableOutcome::Rows(rows)) => {
                let visible: Vec<Row> = rows
                    .iter()
                    .skip(app.scroll_offset)
                    .map(|statement| Row::new(row_cells(statement)))
                    .collect();
                let table = Table::new(visible, column_widths())
                    .header(header_row(app.sort_key))
                    .block(block);
                frame.render_widget(table, area);
            }
            Some(TableOutcome::AllFiltered) => {
                render_message(
                    frame,
                    block,
                    area,
                    "All data has been hidden due to selected filters.",
                    Color::Yellow,
                );
            }
            Some(TableOutcome::NoData) | None => {
                let message = format!("No financial data available for {}", app.ticker);
                render_message(frame, block, area, &message, Color::Red);
            }
        },
    }
}

fn render_loading(frame: &mut Frame, sort_key: SortKey, block: Block, area: Rect) {
    let block = block.title(Line::from(" Loading... ").alignment(Alignment::Right));
    let placeholder = "░".repeat(8);
    let rows: Vec<Row> = (0..PLACEHOLDER_ROWS)
        .map(|_| {
            Row::new(
                StatementField::ALL
                    .iter()
                    .map(|_| Cell::from(placeholder.clone())),
            )
            .style(Style::default().fg(Color::DarkGray))
        })
        .collect();

    let table = Table::new(rows, column_widths())
        .header(header_row(sort_key))
        .block(block);
    frame.render_widget(table, area);
}

fn render_message(frame: &mut Frame, block: Block, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(paragraph, area);
}
