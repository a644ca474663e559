//! PriceRecord: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV row for a single company.
///
/// `symbol` holds the company display name ("SONY"), not the exchange
/// ticker ("6758.T"); that mapping lives in the market config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceRecord {
    /// Basic OHLC sanity check: high >= low, high bounds open/close from
    /// above, low bounds them from below. Advisory only; the pipeline
    /// trusts the source and never rejects rows on this.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// PriceRecord plus the three derived columns.
///
/// `price_change` and `close_open_spread` are computed identically
/// (`close - open`). The duplication is part of the export schema and is
/// kept for file compatibility; deduplicating would break round-tripping
/// of previously exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub price_change: f64,
    pub high_low_spread: f64,
    pub close_open_spread: f64,
}

impl EnrichedRecord {
    /// Derive the three extra columns from a raw record.
    pub fn from_price(r: PriceRecord) -> Self {
        Self {
            price_change: r.close - r.open,
            high_low_spread: r.high - r.low,
            close_open_spread: r.close - r.open,
            symbol: r.symbol,
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PriceRecord {
        PriceRecord {
            symbol: "SONY".into(),
            date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
            open: 100.0,
            high: 115.0,
            low: 95.0,
            close: 110.0,
            volume: 50_000,
        }
    }

    #[test]
    fn record_is_sane() {
        assert!(sample_record().is_sane());
    }

    #[test]
    fn record_detects_insane_high_low() {
        let mut r = sample_record();
        r.high = 90.0; // below low
        assert!(!r.is_sane());
    }

    #[test]
    fn enrichment_arithmetic() {
        let e = EnrichedRecord::from_price(sample_record());
        assert_eq!(e.price_change, 10.0);
        assert_eq!(e.close_open_spread, 10.0);
        assert_eq!(e.high_low_spread, 20.0);
    }

    #[test]
    fn price_change_equals_close_open_spread() {
        let e = EnrichedRecord::from_price(sample_record());
        assert_eq!(e.price_change, e.close_open_spread);
    }

    #[test]
    fn record_serialization_roundtrip() {
        let e = EnrichedRecord::from_price(sample_record());
        let json = serde_json::to_string(&e).unwrap();
        let deser: EnrichedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(e, deser);
    }
}
