//! Property tests for the enrichment arithmetic and the CSV round-trip.
//!
//! Uses proptest to verify:
//! 1. Derived columns are exact subtractions (no rounding anywhere)
//! 2. price_change and close_open_spread are always identical
//! 3. Export followed by import reproduces the dataset bit-for-bit

use chrono::NaiveDate;
use proptest::prelude::*;
use tokyoview_core::data::import_csv;
use tokyoview_core::domain::{Dataset, EnrichedRecord, PriceRecord};
use tokyoview_core::enrich::enrich;
use tokyoview_core::export::to_csv_bytes;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    // Finite positive prices; exactness must hold for arbitrary mantissas,
    // so no rounding to cents here.
    (0.01..100_000.0_f64).prop_filter("finite", |p| p.is_finite())
}

fn arb_record() -> impl Strategy<Value = PriceRecord> {
    (
        arb_price(),
        arb_price(),
        arb_price(),
        arb_price(),
        0u64..10_000_000,
        0u32..700,
        prop::sample::select(vec!["SONY", "TOYOTA", "HITACHI", "NINTENDO"]),
    )
        .prop_map(|(open, high, low, close, volume, day_offset, symbol)| {
            let date = NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
                + chrono::Duration::days(day_offset as i64);
            PriceRecord {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            }
        })
}

proptest! {
    /// Every derived column is the exact subtraction of its operands.
    #[test]
    fn derived_columns_are_exact(record in arb_record()) {
        let enriched = &enrich(vec![record.clone()])[0];
        prop_assert_eq!(enriched.price_change, record.close - record.open);
        prop_assert_eq!(enriched.close_open_spread, record.close - record.open);
        prop_assert_eq!(enriched.high_low_spread, record.high - record.low);
    }

    /// The duplicated column pair never diverges.
    #[test]
    fn price_change_matches_close_open_spread(record in arb_record()) {
        let enriched = &enrich(vec![record])[0];
        prop_assert_eq!(enriched.price_change, enriched.close_open_spread);
    }

    /// Export → import reproduces rows, columns, and values exactly.
    #[test]
    fn csv_roundtrip_is_identity(records in prop::collection::vec(arb_record(), 1..40)) {
        let ds = Dataset::new(
            records.into_iter().map(EnrichedRecord::from_price).collect(),
        );
        let payload = to_csv_bytes(&ds).unwrap();
        let reparsed = import_csv(payload.as_slice()).unwrap();
        prop_assert_eq!(ds, reparsed);
    }
}
