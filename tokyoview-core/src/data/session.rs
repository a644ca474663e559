//! Session cache: process-wide, initialization-once memoization.
//!
//! Two things are cached for the lifetime of the process and never torn
//! down before exit:
//! - the live-fetched dataset (at most one remote load per session, no
//!   matter how many re-renders or symbol changes follow);
//! - export payloads, keyed by a content hash of the dataset so a newly
//!   imported file gets its own entry instead of invalidating anything.
//!
//! An uploaded file never goes through the live cache at all; the caller
//! holds that dataset directly.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use super::provider::DataError;
use crate::domain::Dataset;
use crate::export::to_csv_bytes;

/// Content hash identifying a dataset. Two datasets with identical rows
/// share export payload cache entries.
pub fn dataset_hash(dataset: &Dataset) -> String {
    let bytes = serde_json::to_vec(dataset.records()).expect("dataset rows serialize to JSON");
    blake3::hash(&bytes).to_hex().to_string()
}

/// Process-lifetime cache for the live dataset and export payloads.
#[derive(Default)]
pub struct SessionCache {
    live: OnceLock<Dataset>,
    payloads: Mutex<HashMap<String, Arc<Vec<u8>>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live dataset, running `load` at most once per process.
    ///
    /// A failed load is not cached; the next call tries again. Once a load
    /// succeeds the closure is never run again.
    pub fn live_dataset<F>(&self, load: F) -> Result<&Dataset, DataError>
    where
        F: FnOnce() -> Result<Dataset, DataError>,
    {
        if let Some(ds) = self.live.get() {
            return Ok(ds);
        }
        let ds = load()?;
        Ok(self.live.get_or_init(|| ds))
    }

    /// The live dataset, if one has been loaded this session.
    pub fn live(&self) -> Option<&Dataset> {
        self.live.get()
    }

    /// CSV payload for a dataset, memoized per dataset identity.
    pub fn export_payload(&self, dataset: &Dataset) -> Result<Arc<Vec<u8>>, DataError> {
        let key = dataset_hash(dataset);
        let mut payloads = self.payloads.lock().unwrap();
        if let Some(existing) = payloads.get(&key) {
            return Ok(Arc::clone(existing));
        }
        let payload = Arc::new(to_csv_bytes(dataset)?);
        payloads.insert(key, Arc::clone(&payload));
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EnrichedRecord, PriceRecord};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tiny_dataset(close: f64) -> Dataset {
        Dataset::new(vec![EnrichedRecord::from_price(PriceRecord {
            symbol: "SONY".into(),
            date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
            open: 100.0,
            high: 115.0,
            low: 95.0,
            close,
            volume: 1_000,
        })])
    }

    #[test]
    fn load_runs_at_most_once() {
        let cache = SessionCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let ds = cache
                .live_dataset(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(tiny_dataset(110.0))
                })
                .unwrap();
            assert_eq!(ds.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = SessionCache::new();

        let err = cache.live_dataset(|| Err(DataError::NoData)).unwrap_err();
        assert!(matches!(err, DataError::NoData));
        assert!(cache.live().is_none());

        // Retry succeeds and is then cached.
        cache.live_dataset(|| Ok(tiny_dataset(110.0))).unwrap();
        assert!(cache.live().is_some());
    }

    #[test]
    fn export_payload_memoized_per_dataset_identity() {
        let cache = SessionCache::new();
        let a = tiny_dataset(110.0);
        let b = tiny_dataset(120.0);

        let p1 = cache.export_payload(&a).unwrap();
        let p2 = cache.export_payload(&a).unwrap();
        let p3 = cache.export_payload(&b).unwrap();

        assert!(Arc::ptr_eq(&p1, &p2));
        assert!(!Arc::ptr_eq(&p1, &p3));
    }

    #[test]
    fn identical_rows_share_a_hash() {
        assert_eq!(
            dataset_hash(&tiny_dataset(110.0)),
            dataset_hash(&tiny_dataset(110.0))
        );
        assert_ne!(
            dataset_hash(&tiny_dataset(110.0)),
            dataset_hash(&tiny_dataset(120.0))
        );
    }
}
