//! Uploaded-file path: parse a previously exported `tokyo_index.csv`.
//!
//! The file is assumed to come from this system's own export, so rows are
//! already enriched. Column order and header names match the export schema
//! exactly; anything else is a `CsvError`, surfaced to the UI as-is.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::DataError;
use crate::domain::{Dataset, EnrichedRecord};

/// Header row of the exchange format, in column order.
pub const CSV_HEADER: [&str; 10] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Symbol",
    "Price_change",
    "High_Low_Spread",
    "Close_Open_Spread",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: u64,
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Price_change")]
    price_change: f64,
    #[serde(rename = "High_Low_Spread")]
    high_low_spread: f64,
    #[serde(rename = "Close_Open_Spread")]
    close_open_spread: f64,
}

impl From<CsvRow> for EnrichedRecord {
    fn from(row: CsvRow) -> Self {
        EnrichedRecord {
            symbol: row.symbol,
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            price_change: row.price_change,
            high_low_spread: row.high_low_spread,
            close_open_spread: row.close_open_spread,
        }
    }
}

/// Parse an uploaded CSV payload into a dataset, preserving file order.
pub fn import_csv<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in rdr.deserialize::<CsvRow>() {
        let row = row.map_err(|e| DataError::CsvError(e.to_string()))?;
        records.push(EnrichedRecord::from(row));
    }

    if records.is_empty() {
        return Err(DataError::NoData);
    }

    Ok(Dataset::new(records))
}

/// Convenience wrapper: import from a file on disk.
pub fn import_csv_file(path: &std::path::Path) -> Result<Dataset, DataError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DataError::CsvError(format!("open {}: {e}", path.display())))?;
    import_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume,Symbol,Price_change,High_Low_Spread,Close_Open_Spread
2023-04-03,100,115,95,110,50000,SONY,10,20,10
2023-04-04,110,120,105,112,48000,SONY,2,15,2
";

    #[test]
    fn parses_exported_schema() {
        let ds = import_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.symbol, "SONY");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 4, 3).unwrap());
        assert_eq!(first.close, 110.0);
        assert_eq!(first.price_change, 10.0);
        assert_eq!(first.high_low_spread, 20.0);
    }

    #[test]
    fn preserves_file_order() {
        let ds = import_csv(SAMPLE.as_bytes()).unwrap();
        assert!(ds.records()[0].date < ds.records()[1].date);
    }

    #[test]
    fn empty_file_is_no_data() {
        let header_only = "Date,Open,High,Low,Close,Volume,Symbol,Price_change,High_Low_Spread,Close_Open_Spread\n";
        let err = import_csv(header_only.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::NoData));
    }

    #[test]
    fn malformed_number_is_csv_error() {
        let bad = "\
Date,Open,High,Low,Close,Volume,Symbol,Price_change,High_Low_Spread,Close_Open_Spread
2023-04-03,not_a_number,115,95,110,50000,SONY,10,20,10
";
        let err = import_csv(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::CsvError(_)));
    }
}
