//! App state persistence, JSON save/load across restarts.
//!
//! Only view preferences are persisted. The dataset itself is never written
//! to disk here; each session starts empty and loads fresh.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tokyoview_core::domain::ChartStyle;

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub selected_symbol: Option<String>,
    pub chart_style: ChartStyle,
    pub show_full_table: bool,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_symbol: None,
            chart_style: ChartStyle::Static,
            show_full_table: false,
            active_panel: Panel::Data,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        selected_symbol: app.selected_symbol(),
        chart_style: app.selection.chart_style,
        show_full_table: app.selection.show_full_table,
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.pending_symbol = state.selected_symbol;
    app.selection.chart_style = state.chart_style;
    app.selection.show_full_table = state.show_full_table;
    app.active_panel = state.active_panel;
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
