//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over the remote market-data source so
//! the loader can be tested against a mock and the TUI never talks HTTP
//! directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily OHLCV bar from a provider, before symbol tagging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("ticker not found: {ticker}")]
    SymbolNotFound { ticker: String },

    #[error("hard stop: provider has blocked requests, retry in {retry_in_secs}s")]
    CircuitBreakerTripped { retry_in_secs: u64 },

    #[error("csv error: {0}")]
    CsvError(String),

    #[error("no rows returned for any symbol")]
    NoData,

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for remote quote providers.
///
/// `ticker` is the exchange ticker ("6758.T"); the loader tags the
/// resulting rows with the company display name.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a ticker over a date range.
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawBar>, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}

/// Progress callback for multi-symbol loads.
pub trait FetchProgress: Send {
    /// Called when starting to fetch a company.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a company fetch completes.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, result: &Result<(), DataError>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {symbol}...", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<(), DataError>,
    ) {
        match result {
            Ok(()) => println!("  OK: {symbol}"),
            Err(e) => println!("  FAIL: {symbol}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nFetch complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}

/// Progress reporter that discards all events.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _result: &Result<(), DataError>,
    ) {
    }
    fn on_batch_complete(&self, _succeeded: usize, _failed: usize, _total: usize) {}
}
