//! Background worker thread. Network fetches, CSV imports, and exports run
//! here so the main thread never blocks.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The worker
//! owns the `SessionCache`, so pressing fetch twice in one session answers
//! from memory instead of hitting the provider again.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokyoview_core::data::{
    import_csv_file, load_live, CircuitBreaker, DataError, FetchProgress, MarketConfig,
    SessionCache, YahooProvider,
};
use tokyoview_core::domain::Dataset;

/// Where a dataset came from. Shown in the status bar so the reader always
/// knows whether they are looking at live or uploaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Live,
    Uploaded,
}

impl DatasetSource {
    pub fn label(self) -> &'static str {
        match self {
            DatasetSource::Live => "live data from Yahoo Finance",
            DatasetSource::Uploaded => "uploaded CSV data",
        }
    }
}

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    FetchLive {
        config: MarketConfig,
    },
    ImportCsv {
        path: PathBuf,
    },
    ExportCsv {
        dataset: Box<Dataset>,
        path: PathBuf,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    FetchProgress {
        symbol: String,
        index: usize,
        total: usize,
    },
    FetchSymbolDone {
        symbol: String,
        success: bool,
        error: Option<String>,
    },
    DatasetReady {
        dataset: Box<Dataset>,
        source: DatasetSource,
    },
    LoadError {
        source: DatasetSource,
        error: String,
    },
    ExportDone {
        path: PathBuf,
        bytes: usize,
    },
    ExportError {
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("tokyoview-worker".into())
        .spawn(move || {
            worker_loop(rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    let cache = SessionCache::new();

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, &cache, &tx),
        }
    }
}

fn handle_command(cmd: WorkerCommand, cache: &SessionCache, tx: &Sender<WorkerResponse>) {
    match cmd {
        WorkerCommand::FetchLive { config } => handle_fetch(&config, cache, tx),
        WorkerCommand::ImportCsv { path } => handle_import(&path, tx),
        WorkerCommand::ExportCsv { dataset, path } => handle_export(&dataset, &path, cache, tx),
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

fn handle_fetch(config: &MarketConfig, cache: &SessionCache, tx: &Sender<WorkerResponse>) {
    // A repeat press answers from the cache with no progress events, no
    // provider construction, and no network.
    if let Some(dataset) = cache.live() {
        let _ = tx.send(WorkerResponse::DatasetReady {
            dataset: Box::new(dataset.clone()),
            source: DatasetSource::Live,
        });
        return;
    }

    let progress = ChannelProgress { tx: tx.clone() };

    // The closure only runs on the first fetch of the session.
    let result = cache.live_dataset(|| {
        let breaker = Arc::new(CircuitBreaker::default_provider());
        let provider = YahooProvider::new(breaker);
        load_live(config, &provider, &progress)
    });

    match result {
        Ok(dataset) => {
            let _ = tx.send(WorkerResponse::DatasetReady {
                dataset: Box::new(dataset.clone()),
                source: DatasetSource::Live,
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::LoadError {
                source: DatasetSource::Live,
                error: e.to_string(),
            });
        }
    }
}

fn handle_import(path: &PathBuf, tx: &Sender<WorkerResponse>) {
    match import_csv_file(path) {
        Ok(dataset) => {
            let _ = tx.send(WorkerResponse::DatasetReady {
                dataset: Box::new(dataset),
                source: DatasetSource::Uploaded,
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::LoadError {
                source: DatasetSource::Uploaded,
                error: e.to_string(),
            });
        }
    }
}

fn handle_export(
    dataset: &Dataset,
    path: &PathBuf,
    cache: &SessionCache,
    tx: &Sender<WorkerResponse>,
) {
    let result = cache
        .export_payload(dataset)
        .and_then(|payload| {
            std::fs::write(path, payload.as_slice())
                .map(|_| payload.len())
                .map_err(|e| DataError::Other(format!("write {}: {e}", path.display())))
        });

    match result {
        Ok(bytes) => {
            let _ = tx.send(WorkerResponse::ExportDone {
                path: path.clone(),
                bytes,
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::ExportError {
                error: e.to_string(),
            });
        }
    }
}

/// FetchProgress implementation that sends messages through a channel.
struct ChannelProgress {
    tx: Sender<WorkerResponse>,
}

impl FetchProgress for ChannelProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        let _ = self.tx.send(WorkerResponse::FetchProgress {
            symbol: symbol.to_string(),
            index,
            total,
        });
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        let _ = self.tx.send(WorkerResponse::FetchSymbolDone {
            symbol: symbol.to_string(),
            success: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
        });
    }

    fn on_batch_complete(&self, _succeeded: usize, _failed: usize, _total: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::mpsc;
    use tokyoview_core::domain::{EnrichedRecord, PriceRecord};

    fn small_dataset() -> Dataset {
        Dataset::new(vec![EnrichedRecord::from_price(PriceRecord {
            symbol: "SONY".into(),
            date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
            open: 100.0,
            high: 115.0,
            low: 95.0,
            close: 110.0,
            volume: 1_000,
        })])
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn export_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokyo_index.csv");

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx);

        cmd_tx
            .send(WorkerCommand::ExportCsv {
                dataset: Box::new(small_dataset()),
                path: path.clone(),
            })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::ExportDone { bytes, .. } => {
                assert!(bytes > 0);
            }
            other => panic!("expected ExportDone, got {other:?}"),
        }

        let reimported = import_csv_file(&path).unwrap();
        assert_eq!(reimported, small_dataset());

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn import_of_missing_file_reports_load_error() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx);

        cmd_tx
            .send(WorkerCommand::ImportCsv {
                path: PathBuf::from("/nonexistent/tokyo_index.csv"),
            })
            .unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::LoadError { source, .. } => {
                assert_eq!(source, DatasetSource::Uploaded);
            }
            other => panic!("expected LoadError, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
