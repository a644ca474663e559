//! Enrichment: derives the three per-row statistics.

use crate::domain::{EnrichedRecord, PriceRecord};

/// Compute the derived columns for every row. Pure; row order is preserved
/// and NaN inputs propagate into the derived values untouched.
pub fn enrich(records: Vec<PriceRecord>) -> Vec<EnrichedRecord> {
    records.into_iter().map(EnrichedRecord::from_price).collect()
}
