//! Panel 3: Table: the full enriched dataset, all symbols concatenated.
//!
//! Hidden behind a toggle, like a collapsed section. The table always shows
//! every row regardless of which company the chart has selected.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tokyoview_core::domain::EnrichedRecord;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(dataset) = &app.dataset else {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No data loaded. Fetch (f) or import (i) from the Data panel.",
                theme::muted(),
            )),
            area,
        );
        return;
    };

    if !app.selection.show_full_table {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Full dataset hidden ({} rows).", dataset.len()),
                theme::muted(),
            )),
            Line::from(""),
            Line::from(Span::styled("Press t to show it.", theme::neutral())),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(
            "{:<10} {:>9} {:>9} {:>9} {:>9} {:>10}  {:<20} {:>8} {:>8} {:>8}",
            "Date", "Open", "High", "Low", "Close", "Volume", "Symbol", "Chg", "H-L", "C-O"
        ),
        theme::accent_bold(),
    )));

    let visible_height = (area.height as usize).saturating_sub(1);
    let start = app.table_scroll.min(dataset.len().saturating_sub(1));
    let end = (start + visible_height).min(dataset.len());

    for (i, record) in dataset.records()[start..end].iter().enumerate() {
        let style = if start + i == app.table_scroll {
            theme::neutral().add_modifier(Modifier::REVERSED)
        } else {
            theme::neutral()
        };
        lines.push(Line::from(Span::styled(row_text(record), style)));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn row_text(r: &EnrichedRecord) -> String {
    format!(
        "{:<10} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>10}  {:<20} {:>8.2} {:>8.2} {:>8.2}",
        r.date.to_string(),
        r.open,
        r.high,
        r.low,
        r.close,
        r.volume,
        r.symbol,
        r.price_change,
        r.high_low_spread,
        r.close_open_spread,
    )
}
