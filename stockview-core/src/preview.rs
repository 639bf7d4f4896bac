//! Recent-rows preview table.

use serde::Serialize;

use crate::data::series::PriceSeries;
use crate::export::BASE_COLUMNS;
use crate::format::{format_currency, format_grouped, or_not_available};

/// Rows shown when no override is configured.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Pre-formatted tail of the series, ready for any table renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format the last `rows` rows: prices as `$x.xx`, volume with separators,
/// extras in plain form.
pub fn build_preview(series: &PriceSeries, rows: usize) -> PreviewTable {
    let headers = BASE_COLUMNS
        .iter()
        .map(|h| h.to_string())
        .chain(series.extra_columns.iter().cloned())
        .collect();

    let price = |v: f64| or_not_available(Some(v), |p| format_currency(p, 2));

    let rows = series
        .tail(rows)
        .iter()
        .map(|r| {
            let mut cells = vec![
                r.date.to_string(),
                price(r.open),
                price(r.high),
                price(r.low),
                price(r.close),
                format_grouped(r.volume as f64, 0),
            ];
            cells.extend(r.extras.iter().map(|v| v.to_string()));
            cells
        })
        .collect();

    PreviewTable { headers, rows }
}
