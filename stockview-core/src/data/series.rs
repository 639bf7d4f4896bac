//! Daily OHLCV series as returned by a provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day.
///
/// Missing prices are stored as NaN, a missing volume as 0. `extras` lines up
/// with `PriceSeries::extra_columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub extras: Vec<f64>,
}

impl PriceRow {
    /// True when every OHLC value is NaN and there was no volume.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            && self.high.is_nan()
            && self.low.is_nan()
            && self.close.is_nan()
            && self.volume == 0
    }
}

/// Date-indexed daily series for one symbol.
///
/// Rows are kept in strictly increasing date order; build through
/// [`PriceSeries::from_rows`] to get that guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    /// Provider pass-through columns after Volume (e.g. Dividends, Stock Splits).
    pub extra_columns: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    /// Build a series, sorting by date and keeping the last row for a repeated date.
    pub fn from_rows(
        symbol: impl Into<String>,
        extra_columns: Vec<String>,
        mut rows: Vec<PriceRow>,
    ) -> Self {
        // Stable sort keeps arrival order among equal dates, so the later
        // duplicate is the one that survives below.
        rows.sort_by_key(|r| r.date);
        let mut deduped: Vec<PriceRow> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(last) if last.date == row.date => *last = row,
                _ => deduped.push(row),
            }
        }
        Self {
            symbol: symbol.into(),
            extra_columns,
            rows: deduped,
        }
    }

    pub fn empty(symbol: impl Into<String>, extra_columns: Vec<String>) -> Self {
        Self::from_rows(symbol, extra_columns, Vec::new())
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last `n` rows (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PriceRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}
