//! Application state, single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tokyoview_core::data::MarketConfig;
use tokyoview_core::domain::{ChartStyle, Dataset};

use crate::worker::{DatasetSource, WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Data,
    Chart,
    Table,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Data => 0,
            Panel::Chart => 1,
            Panel::Table => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Data),
            1 => Some(Panel::Chart),
            2 => Some(Panel::Table),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Data => "Data",
            Panel::Chart => "Chart",
            Panel::Table => "Table",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Export,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Export => "EXP",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// What the reader chose: which company, which chart rendering, and whether
/// the full table is shown. Changing any of these never re-fetches data.
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Index into the dataset's distinct symbols, in first-seen order.
    pub symbol_idx: usize,
    pub chart_style: ChartStyle,
    pub show_full_table: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            symbol_idx: 0,
            chart_style: ChartStyle::Static,
            show_full_table: false,
        }
    }
}

/// Visible row window for the interactive chart.
///
/// `width == None` means the full date range is shown. Pan and zoom clamp
/// against the current row count so the window never runs past the data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartViewport {
    pub offset: usize,
    pub width: Option<usize>,
}

const MIN_WINDOW: usize = 8;

impl ChartViewport {
    /// Resolve to a concrete half-open row range for `len` rows.
    pub fn window(&self, len: usize) -> (usize, usize) {
        let w = self.width.unwrap_or(len).min(len);
        let start = self.offset.min(len.saturating_sub(w));
        (start, start + w)
    }

    pub fn is_full(&self, len: usize) -> bool {
        self.width.map(|w| w >= len).unwrap_or(true)
    }

    pub fn pan_left(&mut self, len: usize) {
        let (start, end) = self.window(len);
        let step = ((end - start) / 10).max(1);
        self.offset = start.saturating_sub(step);
    }

    pub fn pan_right(&mut self, len: usize) {
        let (start, end) = self.window(len);
        let step = ((end - start) / 10).max(1);
        self.offset = (start + step).min(len.saturating_sub(end - start));
    }

    pub fn zoom_in(&mut self, len: usize) {
        let (start, end) = self.window(len);
        let w = end - start;
        if w <= MIN_WINDOW {
            return;
        }
        let new_w = (w * 2 / 3).max(MIN_WINDOW);
        // Keep the window centered on the same rows while shrinking.
        self.offset = start + (w - new_w) / 2;
        self.width = Some(new_w);
    }

    pub fn zoom_out(&mut self, len: usize) {
        let (start, end) = self.window(len);
        let w = end - start;
        let new_w = (w * 3 / 2 + 1).min(len);
        if new_w >= len {
            self.reset();
            return;
        }
        self.offset = start.saturating_sub((new_w - w) / 2);
        self.width = Some(new_w);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
        self.width = None;
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Data
    pub config: MarketConfig,
    pub dataset: Option<Dataset>,
    pub source: Option<DatasetSource>,

    // Selection and view
    pub selection: SelectionState,
    pub viewport: ChartViewport,
    pub table_scroll: usize,
    /// Symbol name restored from disk, resolved once a dataset arrives.
    pub pending_symbol: Option<String>,

    // Fetch progress
    pub fetch_in_progress: bool,
    pub fetch_current_symbol: Option<String>,
    pub fetch_done: usize,
    pub fetch_total: usize,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    // Paths
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_panel: Panel::Data,
            running: true,
            config: MarketConfig::default_tokyo(),
            dataset: None,
            source: None,
            selection: SelectionState::default(),
            viewport: ChartViewport::default(),
            table_scroll: 0,
            pending_symbol: None,
            fetch_in_progress: false,
            fetch_current_symbol: None,
            fetch_done: 0,
            fetch_total: 0,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            state_path,
        }
    }

    /// Distinct symbols of the loaded dataset, first-seen order. Empty
    /// before any load.
    pub fn symbols(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|d| d.symbols().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    /// The currently selected company name, if a dataset is loaded.
    pub fn selected_symbol(&self) -> Option<String> {
        let symbols = self.symbols();
        symbols.get(self.selection.symbol_idx).cloned()
    }

    /// Number of rows for the currently selected symbol.
    pub fn selected_row_count(&self) -> usize {
        match (&self.dataset, self.selected_symbol()) {
            (Some(ds), Some(sym)) => ds.filter_symbol(&sym).len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let count = self.symbols().len();
        if count > 0 && self.selection.symbol_idx + 1 < count {
            self.selection.symbol_idx += 1;
            self.on_symbol_changed();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selection.symbol_idx > 0 {
            self.selection.symbol_idx -= 1;
            self.on_symbol_changed();
        }
    }

    fn on_symbol_changed(&mut self) {
        self.viewport.reset();
        self.table_scroll = 0;
    }

    /// Install a freshly loaded dataset and resolve the selection against
    /// its symbol list.
    pub fn apply_dataset(&mut self, dataset: Dataset, source: DatasetSource) {
        let rows = dataset.len();
        self.dataset = Some(dataset);
        self.source = Some(source);

        let symbols = self.symbols();
        if let Some(wanted) = self.pending_symbol.take() {
            if let Some(idx) = symbols.iter().position(|s| *s == wanted) {
                self.selection.symbol_idx = idx;
            }
        }
        if self.selection.symbol_idx >= symbols.len() {
            self.selection.symbol_idx = 0;
        }
        self.on_symbol_changed();

        self.set_status(format!("Using {} ({rows} rows)", source.label()));
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
