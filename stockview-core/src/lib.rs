//! StockView Core: data fetching and every projection the dashboard renders.
//!
//! This crate holds everything below the presentation layer:
//! - Data provider trait and the Yahoo Finance implementation
//! - OHLCV series and company metadata types
//! - Key-metrics table, candlestick chart spec, recent-rows preview
//! - CSV export and its download artifact
//! - The pure per-fetch render cycle shared by the TUI and the CLI

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod export;
pub mod format;
pub mod metrics;
pub mod preview;

pub use chart::{build_candlestick_chart, Candle, ChartSpec, ChartTheme};
pub use config::{ConfigError, DashboardConfig, ProviderConfig};
pub use dashboard::{render, run_cycle, CycleError, DashboardRequest, DashboardView, ViewOptions};
pub use data::{
    CompanyMetadata, DataProvider, FetchError, FetchErrorKind, FetchResult, PriceRow, PriceSeries,
    YahooProvider,
};
pub use export::{to_csv, CsvArtifact, ExportError};
pub use metrics::{build_metrics_table, MetricRow};
pub use preview::{build_preview, PreviewTable};
