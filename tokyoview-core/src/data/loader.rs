//! Live-fetch loader: fetch every company, tag, sort, enrich, concatenate.

use chrono::NaiveDate;

use super::provider::{DataError, FetchProgress, QuoteProvider, RawBar};
use super::universe::MarketConfig;
use crate::domain::{Dataset, PriceRecord};
use crate::enrich::enrich;

/// Fetch daily bars for every company in the config and build the session
/// dataset.
///
/// Rows are tagged with the company display name, sorted by date ascending
/// within each company, enriched, and concatenated in config-table order.
/// Any single company failing fails the whole load; there is no partial
/// dataset.
pub fn load_live(
    config: &MarketConfig,
    provider: &dyn QuoteProvider,
    progress: &dyn FetchProgress,
) -> Result<Dataset, DataError> {
    let total = config.companies.len();
    let mut records: Vec<PriceRecord> = Vec::new();

    for (i, company) in config.companies.iter().enumerate() {
        progress.on_start(&company.name, i, total);

        let result = provider.fetch(&company.ticker, config.start, config.end);
        let outcome = result.as_ref().map(|_| ()).map_err(describe);
        progress.on_complete(&company.name, i, total, &outcome);

        let mut bars = match result {
            Ok(bars) => bars,
            Err(e) => {
                // Only the one fetch failed; the rest were never attempted.
                progress.on_batch_complete(i, 1, total);
                return Err(e);
            }
        };

        bars.sort_by_key(|b| b.date);
        records.extend(bars.into_iter().map(|b| tag(b, &company.name)));
    }

    progress.on_batch_complete(total, 0, total);

    if records.is_empty() {
        return Err(DataError::NoData);
    }

    Ok(Dataset::new(enrich(records)))
}

fn tag(bar: RawBar, name: &str) -> PriceRecord {
    PriceRecord {
        symbol: name.to_string(),
        date: bar.date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    }
}

// DataError is not Clone, so the progress callback gets a rebuilt
// description of the failure rather than the error itself.
fn describe(e: &DataError) -> DataError {
    DataError::Other(e.to_string())
}
