//! One fetch → render cycle.
//!
//! The shell owns a [`DashboardRequest`]; each user-triggered fetch passes it
//! here and gets back a complete [`DashboardView`] or an error. Nothing
//! survives between cycles.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::chart::{build_candlestick_chart, ChartSpec};
use crate::config::DashboardConfig;
use crate::data::provider::{DataProvider, FetchError, FetchResult};
use crate::export::{CsvArtifact, ExportError};
use crate::metrics::{build_metrics_table, MetricRow};
use crate::preview::{build_preview, PreviewTable, DEFAULT_PREVIEW_ROWS};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to export data: {0}")]
    Export(#[from] ExportError),
}

/// The user's inputs for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DashboardRequest {
    /// Symbols are trimmed and uppercased; nothing else is validated.
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            start,
            end,
        }
    }

    /// Initial form state: configured symbol over the trailing lookback window.
    pub fn default_for(today: NaiveDate, config: &DashboardConfig) -> Self {
        Self::new(&config.default_symbol, config.lookback_start(today), today)
    }
}

/// Rendering knobs that are not part of the request itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub preview_rows: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl From<&DashboardConfig> for ViewOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            preview_rows: config.preview_rows,
        }
    }
}

/// Everything the shell displays after a successful fetch.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub request: DashboardRequest,
    pub metrics: Vec<MetricRow>,
    pub chart: ChartSpec,
    pub preview: PreviewTable,
    pub csv: CsvArtifact,
    pub row_count: usize,
}

/// Pure projection of a fetch result into every dashboard artifact.
pub fn render(
    request: &DashboardRequest,
    fetched: FetchResult,
    options: &ViewOptions,
) -> Result<DashboardView, ExportError> {
    let series = fetched.series;
    let csv = CsvArtifact::new(&request.symbol, crate::export::to_csv(&series)?);

    Ok(DashboardView {
        request: request.clone(),
        metrics: build_metrics_table(&fetched.metadata),
        chart: build_candlestick_chart(&series),
        preview: build_preview(&series, options.preview_rows),
        csv,
        row_count: series.len(),
    })
}

/// Fetch once from `provider`, then render. No partial view on failure.
pub fn run_cycle(
    provider: &dyn DataProvider,
    request: &DashboardRequest,
    options: &ViewOptions,
) -> Result<DashboardView, CycleError> {
    debug!(
        provider = provider.name(),
        symbol = %request.symbol,
        start = %request.start,
        end = %request.end,
        "running fetch cycle"
    );
    let fetched = provider.fetch(&request.symbol, request.start, request.end)?;
    Ok(render(request, fetched, options)?)
}
