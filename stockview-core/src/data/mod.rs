//! Market data: provider trait, Yahoo implementation, series and metadata types.

pub mod metadata;
pub mod provider;
pub mod series;
pub mod yahoo;

pub use metadata::CompanyMetadata;
pub use provider::{DataProvider, FetchError, FetchErrorKind, FetchResult};
pub use series::{PriceRow, PriceSeries};
pub use yahoo::YahooProvider;
