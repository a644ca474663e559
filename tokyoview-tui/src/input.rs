//! Keyboard input dispatch, global keys first, then overlays, then the
//! active panel.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tokyoview_core::export::EXPORT_FILE_NAME;

use crate::app::{AppState, Overlay, Panel};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Data; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Chart; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Table; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Data => handle_data_key(app, key),
        Panel::Chart => handle_chart_key(app, key),
        Panel::Table => handle_table_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_data_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('f') => start_fetch(app),
        KeyCode::Char('i') => start_import(app),
        KeyCode::Char('e') => start_export(app),
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    let rows = app.selected_row_count();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('s') => {
            app.selection.chart_style = app.selection.chart_style.toggle();
            app.viewport.reset();
            app.set_status(format!("Chart style: {}", app.selection.chart_style.label()));
        }
        // Pan and zoom only apply to the interactive rendering.
        KeyCode::Char('h') | KeyCode::Left => {
            if interactive(app) {
                app.viewport.pan_left(rows);
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if interactive(app) {
                app.viewport.pan_right(rows);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if interactive(app) {
                app.viewport.zoom_in(rows);
            }
        }
        KeyCode::Char('-') => {
            if interactive(app) {
                app.viewport.zoom_out(rows);
            }
        }
        KeyCode::Char('0') => {
            app.viewport.reset();
        }
        _ => {}
    }
}

fn interactive(app: &AppState) -> bool {
    app.selection.chart_style == tokyoview_core::domain::ChartStyle::Interactive
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.dataset.as_ref().map(|d| d.len()).unwrap_or(0);

    match key.code {
        KeyCode::Char('t') | KeyCode::Char(' ') => {
            app.selection.show_full_table = !app.selection.show_full_table;
            app.table_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.table_scroll + 1 < row_count {
                app.table_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.table_scroll = app.table_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.table_scroll = (app.table_scroll + 20).min(row_count.saturating_sub(1));
        }
        KeyCode::PageUp => {
            app.table_scroll = app.table_scroll.saturating_sub(20);
        }
        KeyCode::Char('g') => {
            app.table_scroll = 0;
        }
        KeyCode::Char('G') => {
            app.table_scroll = row_count.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}

fn start_fetch(app: &mut AppState) {
    if app.fetch_in_progress {
        return;
    }
    app.fetch_in_progress = true;
    app.fetch_done = 0;
    app.fetch_total = app.config.companies.len();
    app.fetch_current_symbol = None;
    let _ = app.worker_tx.send(WorkerCommand::FetchLive {
        config: app.config.clone(),
    });
    app.set_status("Fetching live data...");
}

fn start_import(app: &mut AppState) {
    // Upload path: read an exported file from the working directory.
    let path = PathBuf::from(EXPORT_FILE_NAME);
    let _ = app.worker_tx.send(WorkerCommand::ImportCsv { path });
    app.set_status(format!("Importing {EXPORT_FILE_NAME}..."));
}

fn start_export(app: &mut AppState) {
    let Some(dataset) = app.dataset.clone() else {
        app.set_warning("Nothing to export: load data first (f or i)");
        return;
    };
    let path = PathBuf::from(EXPORT_FILE_NAME);
    let _ = app.worker_tx.send(WorkerCommand::ExportCsv {
        dataset: Box::new(dataset),
        path,
    });
    app.set_status(format!("Exporting {EXPORT_FILE_NAME}..."));
}
