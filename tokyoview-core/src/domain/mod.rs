//! Domain types: price records and the session dataset.

pub mod dataset;
pub mod record;

pub use dataset::{ChartStyle, Dataset};
pub use record::{EnrichedRecord, PriceRecord};
