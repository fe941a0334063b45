mod csv;
mod loader;
mod models;
mod normalize;

pub use loader::{load_market_data, MarketData, ScrapeTimestamps};
pub use models::{NormalizedListing, Row, Source};
pub use normalize::{normalize, parse_source};
