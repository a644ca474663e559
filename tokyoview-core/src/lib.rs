//! Tokyoview Core: data model, providers, enrichment, and export.
//!
//! This crate is the headless half of the Tokyo stock explorer:
//! - Domain types (price records, enriched records, the session dataset)
//! - Data sources (Yahoo Finance live fetch, CSV import) behind a provider trait
//! - The market config (company table + date window)
//! - Per-row enrichment
//! - Session cache (one live load per process, memoized export payloads)
//! - CSV export matching the import schema exactly

pub mod data;
pub mod domain;
pub mod enrich;
pub mod export;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker thread ships across
    /// channels is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceRecord>();
        require_sync::<domain::PriceRecord>();
        require_send::<domain::EnrichedRecord>();
        require_sync::<domain::EnrichedRecord>();
        require_send::<domain::Dataset>();
        require_sync::<domain::Dataset>();
        require_send::<domain::ChartStyle>();
        require_sync::<domain::ChartStyle>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::MarketConfig>();
        require_sync::<data::MarketConfig>();
        require_send::<data::SessionCache>();
        require_sync::<data::SessionCache>();
    }
}
