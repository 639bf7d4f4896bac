//! Key-information table built from company metadata.
//!
//! Every numeric row checks presence before formatting, so a missing or
//! non-numeric field renders as the placeholder instead of failing.

use serde::Serialize;

use crate::data::metadata::{fields, CompanyMetadata};
use crate::format::{
    format_currency, format_currency_grouped, format_fixed, format_percent, or_not_available,
    NOT_AVAILABLE,
};

/// One (label, formatted value) row of the key-information table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
}

/// Row labels, in display order.
pub const METRIC_LABELS: [&str; 8] = [
    "Company Name",
    "Sector",
    "Industry",
    "Market Cap",
    "Forward P/E",
    "Dividend Yield",
    "52 Week High",
    "52 Week Low",
];

fn text_or_placeholder(metadata: &CompanyMetadata, key: &str) -> String {
    metadata
        .text(key)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Build the fixed 8-row key-information table.
pub fn build_metrics_table(metadata: &CompanyMetadata) -> Vec<MetricRow> {
    // Market cap falls back to zero rather than the placeholder.
    let market_cap = metadata.number(fields::MARKET_CAP).unwrap_or(0.0);

    let values = [
        text_or_placeholder(metadata, fields::LONG_NAME),
        text_or_placeholder(metadata, fields::SECTOR),
        text_or_placeholder(metadata, fields::INDUSTRY),
        format_currency_grouped(market_cap, 0),
        or_not_available(metadata.number(fields::FORWARD_PE), |v| format_fixed(v, 2)),
        or_not_available(metadata.number(fields::DIVIDEND_YIELD), |v| {
            format_percent(v, 2)
        }),
        or_not_available(metadata.number(fields::FIFTY_TWO_WEEK_HIGH), |v| {
            format_currency(v, 2)
        }),
        or_not_available(metadata.number(fields::FIFTY_TWO_WEEK_LOW), |v| {
            format_currency(v, 2)
        }),
    ];

    METRIC_LABELS
        .iter()
        .zip(values)
        .map(|(&label, value)| MetricRow { label, value })
        .collect()
}
