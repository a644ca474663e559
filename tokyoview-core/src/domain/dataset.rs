//! Dataset: the per-session collection of enriched rows.

use serde::{Deserialize, Serialize};

use super::record::EnrichedRecord;

/// Which of the two chart renderings is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartStyle {
    Static,
    Interactive,
}

impl ChartStyle {
    pub fn toggle(self) -> Self {
        match self {
            ChartStyle::Static => ChartStyle::Interactive,
            ChartStyle::Interactive => ChartStyle::Static,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Static => "Static",
            ChartStyle::Interactive => "Interactive",
        }
    }
}

/// All enriched rows for the session, every symbol concatenated.
///
/// Built once per session (live fetch or CSV import) and never mutated
/// afterwards. Row order is whatever the source produced: import keeps
/// file order, the live loader sorts by date within each symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<EnrichedRecord>,
}

impl Dataset {
    pub fn new(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct symbol values in first-seen order. These are the selector
    /// options offered to the user.
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.symbol.as_str()) {
                seen.push(&r.symbol);
            }
        }
        seen
    }

    /// Rows for one symbol, preserving dataset order.
    pub fn filter_symbol(&self, symbol: &str) -> Vec<&EnrichedRecord> {
        self.records.iter().filter(|r| r.symbol == symbol).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRecord;
    use chrono::NaiveDate;

    fn record(symbol: &str, day: u32, close: f64) -> EnrichedRecord {
        EnrichedRecord::from_price(PriceRecord {
            symbol: symbol.into(),
            date: NaiveDate::from_ymd_opt(2023, 4, day).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 3.0,
            close,
            volume: 1_000,
        })
    }

    #[test]
    fn symbols_are_distinct_first_seen() {
        let ds = Dataset::new(vec![
            record("SONY", 3, 100.0),
            record("TOYOTA", 3, 50.0),
            record("SONY", 4, 101.0),
            record("HONDA", 3, 30.0),
        ]);
        assert_eq!(ds.symbols(), vec!["SONY", "TOYOTA", "HONDA"]);
    }

    #[test]
    fn filter_preserves_order() {
        let ds = Dataset::new(vec![
            record("SONY", 4, 101.0),
            record("TOYOTA", 3, 50.0),
            record("SONY", 3, 100.0),
        ]);
        let rows = ds.filter_symbol("SONY");
        assert_eq!(rows.len(), 2);
        // Dataset order, not chronological
        assert_eq!(rows[0].close, 101.0);
        assert_eq!(rows[1].close, 100.0);
    }

    #[test]
    fn filter_unknown_symbol_is_empty() {
        let ds = Dataset::new(vec![record("SONY", 3, 100.0)]);
        assert!(ds.filter_symbol("NINTENDO").is_empty());
    }

    #[test]
    fn chart_style_toggles() {
        assert_eq!(ChartStyle::Static.toggle(), ChartStyle::Interactive);
        assert_eq!(ChartStyle::Interactive.toggle(), ChartStyle::Static);
    }
}
