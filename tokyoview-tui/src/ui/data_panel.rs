//! Panel 1: Data: company selector, data source, fetch progress.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    // Header: data source and key hints.
    let source_label = app
        .source
        .map(|s| s.label())
        .unwrap_or("no data loaded");
    lines.push(Line::from(vec![
        Span::styled("Source: ", theme::muted()),
        Span::styled(source_label, theme::accent()),
        Span::styled("  [f]etch live [i]mport csv [e]xport [j/k]select", theme::muted()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Window: ", theme::muted()),
        Span::styled(
            format!("{} .. {}", app.config.start, app.config.end),
            theme::neutral(),
        ),
    ]));
    lines.push(Line::from(""));

    // Fetch progress.
    if app.fetch_in_progress {
        let sym = app.fetch_current_symbol.as_deref().unwrap_or("...");
        lines.push(Line::from(vec![
            Span::styled("Fetching ", theme::warning()),
            Span::styled(sym, theme::accent()),
            Span::styled(
                format!("... [{}/{}]", app.fetch_done, app.fetch_total),
                theme::muted(),
            ),
        ]));
        lines.push(Line::from(""));
    }

    match &app.dataset {
        Some(dataset) => {
            // One row per distinct symbol, cursor is the selection.
            for (i, symbol) in dataset.symbols().iter().enumerate() {
                let is_selected = i == app.selection.symbol_idx;
                let marker = if is_selected { "▸ " } else { "  " };
                let rows = dataset.filter_symbol(symbol).len();

                let name_style = if is_selected {
                    theme::accent().add_modifier(Modifier::REVERSED)
                } else {
                    theme::neutral()
                };

                lines.push(Line::from(vec![
                    Span::styled(marker, theme::accent()),
                    Span::styled(format!("{symbol:<22}"), name_style),
                    Span::styled(format!(" {rows} rows"), theme::muted()),
                ]));
            }
        }
        None => {
            // Before any load, show the fixed company table greyed out.
            for company in &app.config.companies {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<22}", company.name), theme::muted()),
                    Span::styled(company.ticker.as_str(), theme::muted()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Press f to fetch live data, or i to import tokyo_index.csv.",
                theme::muted(),
            )));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
