//! Property tests for the dashboard projections.
//!
//! Uses proptest to verify:
//! 1. Metrics table: never empty values, "N/A" for every absent non-cap field
//! 2. CSV round trip: same row count and values after parsing back
//! 3. Chart: one candle per row, any length including zero

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::Value;
use stockview_core::data::metadata::fields;
use stockview_core::{
    build_candlestick_chart, build_metrics_table, to_csv, CompanyMetadata, PriceRow, PriceSeries,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_row() -> impl Strategy<Value = (u16, f64, f64, f64, f64, u64, f64)> {
    (
        0u16..2000,
        arb_price(),
        arb_price(),
        arb_price(),
        arb_price(),
        0u64..10_000_000_000,
        prop_oneof![Just(0.0), (0.01..5.0_f64)],
    )
}

fn arb_series() -> impl Strategy<Value = PriceSeries> {
    prop::collection::vec(arb_row(), 0..40).prop_map(|raw| {
        let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let rows = raw
            .into_iter()
            .map(|(offset, o, h, l, c, v, div)| PriceRow {
                date: base + chrono::Duration::days(offset as i64),
                open: o,
                high: h,
                low: l,
                close: c,
                volume: v,
                extras: vec![div, 0.0],
            })
            .collect();
        PriceSeries::from_rows("TEST", vec!["Dividends".into(), "Stock Splits".into()], rows)
    })
}

/// A value for a metadata field: absent, null, garbage text, or a number.
fn arb_field() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        "[a-zA-Z ]{0,12}".prop_map(|s| Some(Value::String(s))),
        (-1.0e13..1.0e13_f64).prop_map(|n| Some(serde_json::json!(n))),
    ]
}

const ALL_FIELDS: [&str; 8] = [
    fields::LONG_NAME,
    fields::SECTOR,
    fields::INDUSTRY,
    fields::MARKET_CAP,
    fields::FORWARD_PE,
    fields::DIVIDEND_YIELD,
    fields::FIFTY_TWO_WEEK_HIGH,
    fields::FIFTY_TWO_WEEK_LOW,
];

// ── 1. Metrics table ─────────────────────────────────────────────────

proptest! {
    /// Any mix of absent, null, text and numeric fields yields 8 non-empty rows.
    #[test]
    fn metrics_table_never_fails(values in prop::collection::vec(arb_field(), 8)) {
        let mut meta = CompanyMetadata::new();
        for (key, value) in ALL_FIELDS.iter().zip(values.iter()) {
            if let Some(v) = value {
                meta.insert(*key, v.clone());
            }
        }
        let rows = build_metrics_table(&meta);
        prop_assert_eq!(rows.len(), 8);
        for row in &rows {
            prop_assert!(!row.value.is_empty(), "empty value for {}", row.label);
        }
    }

    /// Every absent field except Market Cap renders as "N/A".
    #[test]
    fn absent_fields_are_placeholders(present in prop::collection::vec(any::<bool>(), 8)) {
        let mut meta = CompanyMetadata::new();
        for (key, keep) in ALL_FIELDS.iter().zip(present.iter()) {
            if *keep {
                meta.insert(*key, serde_json::json!(12.5));
            }
        }
        let rows = build_metrics_table(&meta);
        for (i, keep) in present.iter().enumerate() {
            if *keep {
                continue;
            }
            if ALL_FIELDS[i] == fields::MARKET_CAP {
                prop_assert_eq!(rows[i].value.as_str(), "$0");
            } else {
                prop_assert_eq!(rows[i].value.as_str(), "N/A");
            }
        }
    }
}

// ── 2. CSV round trip ────────────────────────────────────────────────

proptest! {
    /// Parsing the CSV back reproduces row count, dates and values.
    #[test]
    fn csv_round_trip(series in arb_series()) {
        let text = to_csv(&series).unwrap();
        let mut rdr = csv::Reader::from_reader(text.as_bytes());

        let headers = rdr.headers().unwrap().clone();
        prop_assert_eq!(headers.len(), 8);
        prop_assert_eq!(&headers[0], "Date");

        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(records.len(), series.len());

        for (rec, row) in records.iter().zip(series.rows()) {
            prop_assert_eq!(rec[0].parse::<NaiveDate>().unwrap(), row.date);
            prop_assert_eq!(rec[1].parse::<f64>().unwrap(), row.open);
            prop_assert_eq!(rec[2].parse::<f64>().unwrap(), row.high);
            prop_assert_eq!(rec[3].parse::<f64>().unwrap(), row.low);
            prop_assert_eq!(rec[4].parse::<f64>().unwrap(), row.close);
            prop_assert_eq!(rec[5].parse::<u64>().unwrap(), row.volume);
            prop_assert_eq!(rec[6].parse::<f64>().unwrap(), row.extras[0]);
        }
    }

    /// Series dates strictly increase whatever order rows arrive in.
    #[test]
    fn series_dates_strictly_increase(series in arb_series()) {
        for w in series.rows().windows(2) {
            prop_assert!(w[0].date < w[1].date);
        }
    }
}

// ── 3. Chart ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn one_candle_per_row(series in arb_series()) {
        let chart = build_candlestick_chart(&series);
        prop_assert_eq!(chart.candles.len(), series.len());
        prop_assert_eq!(chart.price_bounds().is_none(), series.is_empty());
    }
}
