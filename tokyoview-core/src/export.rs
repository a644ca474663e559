//! CSV export: serialize the full enriched dataset as bytes for download.
//!
//! The output is the inverse of `data::csv_import`: same header, same column
//! order, UTF-8, no index column. Floats go through the csv crate's default
//! formatting (shortest round-trip representation), so an export/import
//! cycle reproduces the dataset exactly.

use crate::data::csv_import::CSV_HEADER;
use crate::data::provider::DataError;
use crate::domain::Dataset;

/// Conventional file name for both upload and download.
pub const EXPORT_FILE_NAME: &str = "tokyo_index.csv";

/// Serialize the entire dataset (all symbols) to a CSV byte payload.
pub fn to_csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, DataError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)
        .map_err(|e| DataError::CsvError(e.to_string()))?;

    for r in dataset.records() {
        wtr.write_record([
            r.date.to_string(),
            fmt_f64(r.open),
            fmt_f64(r.high),
            fmt_f64(r.low),
            fmt_f64(r.close),
            r.volume.to_string(),
            r.symbol.clone(),
            fmt_f64(r.price_change),
            fmt_f64(r.high_low_spread),
            fmt_f64(r.close_open_spread),
        ])
        .map_err(|e| DataError::CsvError(e.to_string()))?;
    }

    wtr.into_inner()
        .map_err(|e| DataError::CsvError(e.to_string()))
}

// Rust's default f64 Display prints the shortest string that parses back to
// the same bit pattern, which is what the round-trip property needs.
fn fmt_f64(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_import::import_csv;
    use crate::domain::{EnrichedRecord, PriceRecord};
    use chrono::NaiveDate;

    fn sample_dataset() -> Dataset {
        let rows = vec![
            PriceRecord {
                symbol: "SONY".into(),
                date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
                open: 100.5,
                high: 115.25,
                low: 95.0,
                close: 110.125,
                volume: 50_000,
            },
            PriceRecord {
                symbol: "TOYOTA".into(),
                date: NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
                open: 2000.0,
                high: 2050.0,
                low: 1990.0,
                close: 2025.0,
                volume: 1_200_000,
            },
        ];
        Dataset::new(rows.into_iter().map(EnrichedRecord::from_price).collect())
    }

    #[test]
    fn header_matches_import_schema() {
        let bytes = to_csv_bytes(&sample_dataset()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, CSV_HEADER.join(","));
    }

    #[test]
    fn export_import_roundtrip_is_exact() {
        let ds = sample_dataset();
        let bytes = to_csv_bytes(&ds).unwrap();
        let reparsed = import_csv(bytes.as_slice()).unwrap();
        assert_eq!(ds, reparsed);
    }

    #[test]
    fn no_index_column() {
        let bytes = to_csv_bytes(&sample_dataset()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let data_line = text.lines().nth(1).unwrap();
        assert!(data_line.starts_with("2023-04-03,"));
    }
}
