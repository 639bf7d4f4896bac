//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the market-data source so the render
//! cycle can run against Yahoo Finance in production and an in-memory provider
//! in tests.

use chrono::NaiveDate;
use thiserror::Error;

use super::metadata::CompanyMetadata;
use super::series::PriceSeries;

/// What went wrong while talking to the provider.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum FetchErrorKind {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found")]
    SymbolNotFound,

    #[error("HTTP {0}")]
    Http(u16),

    #[error("{0}")]
    Other(String),
}

/// A failed fetch. Always names the symbol that was requested.
#[derive(Debug, Error)]
#[error("error fetching data for {symbol}: {kind}")]
pub struct FetchError {
    pub symbol: String,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(symbol: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
        }
    }

    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self.kind, FetchErrorKind::SymbolNotFound)
    }
}

/// Result of a successful fetch: the daily series plus company metadata.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub series: PriceSeries,
    pub metadata: CompanyMetadata,
}

/// Trait for market-data providers.
///
/// One call to `fetch` is one round trip to the provider. Nothing is cached
/// between calls and nothing is retried.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV rows and company metadata for a symbol.
    ///
    /// Both bounds are inclusive. An inverted or empty range is not an error:
    /// the provider decides what comes back, usually an empty series.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_symbol_and_cause() {
        let err = FetchError::new("ZZZINVALID", FetchErrorKind::SymbolNotFound);
        let msg = err.to_string();
        assert!(msg.contains("ZZZINVALID"));
        assert!(msg.contains("symbol not found"));
        assert!(err.is_symbol_not_found());
    }

    #[test]
    fn http_error_displays_status() {
        let err = FetchError::new("AAPL", FetchErrorKind::Http(502));
        assert_eq!(err.to_string(), "error fetching data for AAPL: HTTP 502");
    }
}
