//! Revenue line chart over the filtered statements

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, LoadState};
use crate::format::format_large_number;
use crate::pipeline::revenue_series;

/// Converts a date to a fractional year for the x axis
fn year_position(date: NaiveDate) -> f64 {
    date.year() as f64 + date.ordinal0() as f64 / 366.0
}

/// Chart points as (fractional year, revenue)
fn chart_points(series: &[(NaiveDate, f64)]) -> Vec<(f64, f64)> {
    series
        .iter()
        .map(|(date, revenue)| (year_position(*date), *revenue))
        .collect()
}

/// Axis bounds with some headroom; a single point gets a non-empty range
fn bounds(values: impl Iterator<Item = f64> + Clone, floor_at_zero: bool) -> [f64; 2] {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }

    let low = if floor_at_zero { min.min(0.0) } else { min };
    if (max - low).abs() < f64::EPSILON {
        [low - 1.0, max + 1.0]
    } else if floor_at_zero {
        [low, max + (max - low) * 0.1]
    } else {
        [low, max]
    }
}

/// Renders the chart, or a placeholder while loading or without data
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Revenue ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let series = match (&app.load_state, &app.view) {
        (LoadState::Loaded(_), Some(view)) => revenue_series(&view.filtered),
        (LoadState::Loading, _) => {
            render_placeholder(frame, block, area, "Loading...");
            return;
        }
        _ => Vec::new(),
    };

    if series.is_empty() {
        render_placeholder(frame, block, area, "No revenue data to chart");
        return;
    }

    let points = chart_points(&series);
    let x_bounds = bounds(points.iter().map(|(x, _)| *x), false);
    let y_bounds = bounds(points.iter().map(|(_, y)| *y), true);

    let first_year = series.first().map(|(date, _)| date.year()).unwrap_or_default();
    let last_year = series.last().map(|(date, _)| date.year()).unwrap_or_default();
    let x_labels = vec![
        Span::raw(first_year.to_string()),
        Span::raw(last_year.to_string()),
    ];
    let y_labels = vec![
        Span::raw(format_large_number(y_bounds[0])),
        Span::raw(format_large_number((y_bounds[0] + y_bounds[1]) / 2.0)),
        Span::raw(format_large_number(y_bounds[1])),
    ];

    let dataset = Dataset::default()
        .name("Revenue")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_placeholder(frame: &mut Frame, block: Block, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
