//! Panel 2: Chart: close-price line for the selected company.
//!
//! Two renderings share the same filtered rows. Static always shows the
//! full date range; interactive adds a pan/zoom viewport with a position
//! slider under the chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use tokyoview_core::domain::{ChartStyle, EnrichedRecord};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(dataset) = &app.dataset else {
        render_empty(f, area);
        return;
    };
    let Some(symbol) = app.selected_symbol() else {
        render_empty(f, area);
        return;
    };

    let rows = dataset.filter_symbol(&symbol);
    if rows.is_empty() {
        render_empty(f, area);
        return;
    }

    match app.selection.chart_style {
        ChartStyle::Static => {
            let title = format!("{symbol} Stock Price Over Time");
            render_line(f, area, &rows, 0, rows.len(), &title);
        }
        ChartStyle::Interactive => {
            let title = format!("{symbol} Stock Price Over Time (Interactive)");
            let (start, end) = app.viewport.window(rows.len());

            // Reserve one line under the chart for the position slider.
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(area);
            render_line(f, chunks[0], &rows, start, end, &title);
            render_slider(f, chunks[1], start, end, rows.len());
        }
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No data to chart yet.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Go to the Data panel (press 1) and fetch (f) or import (i) first.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_line(
    f: &mut Frame,
    area: Rect,
    rows: &[&EnrichedRecord],
    start: usize,
    end: usize,
    title: &str,
) {
    let visible = &rows[start..end];

    let min_y = visible
        .iter()
        .map(|r| r.close)
        .fold(f64::INFINITY, f64::min);
    let max_y = visible
        .iter()
        .map(|r| r.close)
        .fold(f64::NEG_INFINITY, f64::max);

    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;

    // x is the absolute row index so the axis stays stable while panning.
    let data: Vec<(f64, f64)> = visible
        .iter()
        .enumerate()
        .map(|(i, r)| ((start + i) as f64, r.close))
        .collect();

    let x_min = start as f64;
    let x_max = (end.saturating_sub(1)).max(start + 1) as f64;

    let first_date = visible.first().map(|r| r.date.to_string()).unwrap_or_default();
    let mid_date = visible
        .get(visible.len() / 2)
        .map(|r| r.date.to_string())
        .unwrap_or_default();
    let last_date = visible.last().map(|r| r.date.to_string()).unwrap_or_default();

    let series = Dataset::default()
        .name(title.to_string())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![series])
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::styled(first_date, theme::muted()),
                    Span::styled(mid_date, theme::muted()),
                    Span::styled(last_date, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Close Price (JPY)", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{:.0}", (y_min + y_max) / 2.0), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// One-line track showing where the viewport sits in the full series.
fn render_slider(f: &mut Frame, area: Rect, start: usize, end: usize, len: usize) {
    let track_width = area.width.saturating_sub(2).max(1) as usize;
    let fill_from = start * track_width / len.max(1);
    let fill_to = (end * track_width / len.max(1)).max(fill_from + 1).min(track_width);

    let mut track = String::with_capacity(track_width);
    for i in 0..track_width {
        track.push(if i >= fill_from && i < fill_to { '▓' } else { '─' });
    }

    let line = Line::from(vec![
        Span::styled("[", theme::muted()),
        Span::styled(track, theme::accent()),
        Span::styled("]", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
