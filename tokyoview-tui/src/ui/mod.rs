//! Top-level UI layout, four-panel frame with status bar.

pub mod chart_panel;
pub mod data_panel;
pub mod help_panel;
pub mod overlays;
pub mod status_bar;
pub mod table_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    // Draw the active panel.
    draw_panel(f, main_area, app);

    // Draw status bar.
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let is_active = true; // always active since we show only one

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Data => data_panel::render(f, inner, app),
        Panel::Chart => chart_panel::render(f, inner, app),
        Panel::Table => table_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use tokyoview_core::domain::{ChartStyle, Dataset, EnrichedRecord, PriceRecord};

    use crate::app::AppState;
    use crate::worker::DatasetSource;

    fn test_app() -> AppState {
        let (tx, _rx) = std::sync::mpsc::channel();
        let (_tx2, rx2) = std::sync::mpsc::channel();
        AppState::new(tx, rx2, PathBuf::from("."))
    }

    fn loaded_app() -> AppState {
        let mut app = test_app();
        let records: Vec<EnrichedRecord> = (1..=25)
            .flat_map(|day| {
                ["SONY", "TOYOTA"].map(|sym| {
                    EnrichedRecord::from_price(PriceRecord {
                        symbol: sym.into(),
                        date: NaiveDate::from_ymd_opt(2023, 4, day).unwrap(),
                        open: 100.0,
                        high: 112.0,
                        low: 94.0,
                        close: 100.0 + day as f64,
                        volume: 10_000,
                    })
                })
            })
            .collect();
        app.apply_dataset(Dataset::new(records), DatasetSource::Live);
        app
    }

    fn render_to_text(app: &AppState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn every_panel_renders_without_data() {
        let mut app = test_app();
        for panel in [Panel::Data, Panel::Chart, Panel::Table, Panel::Help] {
            app.active_panel = panel;
            let text = render_to_text(&app);
            assert!(text.contains(panel.label()));
        }
    }

    #[test]
    fn data_panel_lists_loaded_symbols() {
        let mut app = loaded_app();
        app.active_panel = Panel::Data;
        let text = render_to_text(&app);
        assert!(text.contains("SONY"));
        assert!(text.contains("TOYOTA"));
        assert!(text.contains("live data from Yahoo Finance"));
    }

    #[test]
    fn chart_panel_renders_both_styles() {
        let mut app = loaded_app();
        app.active_panel = Panel::Chart;

        let static_text = render_to_text(&app);
        assert!(static_text.contains("Close Price (JPY)"));

        app.selection.chart_style = ChartStyle::Interactive;
        app.viewport.zoom_in(app.selected_row_count());
        let interactive_text = render_to_text(&app);
        assert!(interactive_text.contains("Close Price (JPY)"));
        // Slider track only exists in the interactive rendering.
        assert!(interactive_text.contains('▓'));
        assert!(!static_text.contains('▓'));
    }

    #[test]
    fn table_panel_hidden_until_toggled() {
        let mut app = loaded_app();
        app.active_panel = Panel::Table;

        let hidden = render_to_text(&app);
        assert!(hidden.contains("Press t to show it"));

        app.selection.show_full_table = true;
        let shown = render_to_text(&app);
        assert!(shown.contains("Symbol"));
        assert!(shown.contains("2023-04-01"));
    }

    #[test]
    fn welcome_overlay_renders_on_top() {
        let mut app = loaded_app();
        app.overlay = Overlay::Welcome;
        let text = render_to_text(&app);
        assert!(text.contains("Welcome to Tokyo Stock Explorer"));
    }
}
