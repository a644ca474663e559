//! Tokyo Stock Explorer TUI: four-panel terminal interface with vim-style
//! navigation.
//!
//! Panels:
//! 1. Data: company selector, live fetch, CSV import/export
//! 2. Chart: close-price line, static or interactive rendering
//! 3. Table: the full enriched dataset behind a toggle
//! 4. Help: keyboard shortcuts

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{DatasetSource, WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tokyoview")
        .join("state.json");

    // Load persisted state
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Spawn worker
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    // Build app state
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, state_path.clone());

    // Apply persisted state
    persistence::apply(&mut app, persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&app.state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::FetchProgress {
            symbol,
            index,
            total,
        } => {
            app.fetch_current_symbol = Some(symbol);
            app.fetch_done = index;
            app.fetch_total = total;
        }
        WorkerResponse::FetchSymbolDone {
            symbol,
            success,
            error,
        } => {
            if !success {
                if let Some(err) = error {
                    app.push_error(
                        ErrorCategory::Network,
                        format!("Failed to fetch: {err}"),
                        symbol,
                    );
                }
            }
            app.fetch_done += 1;
        }
        WorkerResponse::DatasetReady { dataset, source } => {
            app.fetch_in_progress = false;
            app.fetch_current_symbol = None;
            app.apply_dataset(*dataset, source);
        }
        WorkerResponse::LoadError { source, error } => {
            app.fetch_in_progress = false;
            app.fetch_current_symbol = None;
            let category = match source {
                DatasetSource::Live => ErrorCategory::Network,
                DatasetSource::Uploaded => ErrorCategory::Data,
            };
            app.push_error(category, error, source.label().into());
        }
        WorkerResponse::ExportDone { path, bytes } => {
            app.set_status(format!("Exported {} ({bytes} bytes)", path.display()));
        }
        WorkerResponse::ExportError { error } => {
            app.push_error(ErrorCategory::Export, error, "csv export".into());
        }
    }
}
