//! Candlestick chart specification.
//!
//! The description is renderer-agnostic: the TUI draws it with its candle widget and
//! the CLI can dump it as JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::series::PriceSeries;

pub const CHART_TITLE: &str = "Stock Price History";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price";
pub const CHART_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTheme {
    Dark,
}

/// One trading day's glyph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// Height in pixels for graphical renderers.
    pub height: u32,
    pub theme: ChartTheme,
    pub candles: Vec<Candle>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Lowest and highest price across all candles, ignoring NaN. Open and
    /// close count too, so a candle missing its high/low still has a range.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.candles
            .iter()
            .flat_map(|c| [c.open, c.high, c.low, c.close])
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<(f64, f64)>, v| {
                Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
            })
    }

    /// First and last candle dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.candles.first()?.date, self.candles.last()?.date))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One candle per series row, in date order. An empty series gives an empty chart.
pub fn build_candlestick_chart(series: &PriceSeries) -> ChartSpec {
    let candles = series
        .rows()
        .iter()
        .map(|r| Candle {
            date: r.date,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.into(),
        x_axis_title: X_AXIS_TITLE.into(),
        y_axis_title: Y_AXIS_TITLE.into(),
        height: CHART_HEIGHT,
        theme: ChartTheme::Dark,
        candles,
    }
}
