//! Panel 4: Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Data");
    key(&mut lines, "j / k", "Select company down / up");
    key(&mut lines, "f", "Fetch live data (once per session)");
    key(&mut lines, "i", "Import tokyo_index.csv from the working directory");
    key(&mut lines, "e", "Export the full dataset to tokyo_index.csv");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Chart");
    key(&mut lines, "j / k", "Select company down / up");
    key(&mut lines, "s", "Toggle static / interactive rendering");
    key(&mut lines, "h / l", "Pan viewport (interactive only)");
    key(&mut lines, "+ / -", "Zoom viewport in / out (interactive only)");
    key(&mut lines, "0", "Reset viewport to the full date range");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3: Table");
    key(&mut lines, "t / Space", "Show or hide the full dataset");
    key(&mut lines, "j / k", "Scroll one row");
    key(&mut lines, "PgUp / PgDn", "Scroll twenty rows");
    key(&mut lines, "g / G", "Jump to first / last row");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4: Help (this panel)");
    key(&mut lines, "e", "Open error history overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(&mut lines, "Fetch", "Live data is fetched at most once per session");
    key(&mut lines, "Import", "An uploaded CSV replaces the current dataset");
    key(&mut lines, "Export", "Always covers every company, not just the selection");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
