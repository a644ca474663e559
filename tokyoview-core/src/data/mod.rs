//! Data sources and the session cache.

pub mod circuit_breaker;
pub mod csv_import;
pub mod loader;
pub mod provider;
pub mod session;
pub mod universe;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_import::{import_csv, import_csv_file};
pub use loader::load_live;
pub use provider::{DataError, FetchProgress, QuoteProvider, RawBar, SilentProgress, StdoutProgress};
pub use session::{dataset_hash, SessionCache};
pub use universe::{Company, MarketConfig};
pub use yahoo::YahooProvider;
