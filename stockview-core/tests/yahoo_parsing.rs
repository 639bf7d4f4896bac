//! Yahoo response parsing against frozen fixtures. No network access.

use chrono::NaiveDate;
use std::path::PathBuf;
use stockview_core::data::yahoo::{parse_chart_response, parse_quote_summary};
use stockview_core::{build_metrics_table, FetchErrorKind};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path:?}: {e}"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn aapl_first_ten_days_of_2023() {
    let series =
        parse_chart_response("AAPL", &fixture("aapl_chart_2023-01-01_2023-01-10.json")).unwrap();

    // Trading days only: the null holiday row is dropped and the trailing
    // live bar collapses onto 2023-01-10.
    assert!(series.len() <= 7, "expected at most 7 trading days, got {}", series.len());
    assert_eq!(series.len(), 6);
    assert_eq!(series.first_date(), Some(date(2023, 1, 3)));
    assert_eq!(series.last_date(), Some(date(2023, 1, 10)));

    for window in series.rows().windows(2) {
        assert!(window[0].date < window[1].date);
    }

    for row in series.rows() {
        assert!(row.open <= row.high, "open above high on {}", row.date);
        assert!(row.close >= row.low, "close below low on {}", row.date);
        assert!(row.volume > 0);
    }

    let first = &series.rows()[0];
    assert!((first.close - 125.07).abs() < 0.01);
    assert_eq!(first.volume, 112_117_500);
}

#[test]
fn chart_rows_carry_dividend_and_split_columns() {
    let series =
        parse_chart_response("AAPL", &fixture("aapl_chart_2023-01-01_2023-01-10.json")).unwrap();
    assert_eq!(series.extra_columns, vec!["Dividends", "Stock Splits"]);
    for row in series.rows() {
        assert_eq!(row.extras, vec![0.0, 0.0]);
    }
}

#[test]
fn chart_events_land_on_their_trading_day() {
    // 2023-02-10 14:30 UTC ex-dividend, 2020-style 4:1 split on the same bar for coverage
    let body = r#"{"chart":{"result":[{
        "meta":{"gmtoffset":-18000},
        "timestamp":[1675953000,1676039400],
        "events":{
            "dividends":{"1676039400":{"amount":0.23,"date":1676039400}},
            "splits":{"1676039400":{"date":1676039400,"numerator":4,"denominator":1,"splitRatio":"4:1"}}
        },
        "indicators":{"quote":[{
            "open":[153.88,149.46],"high":[154.33,151.34],"low":[150.42,149.22],
            "close":[150.87,151.01],"volume":[64120100,57409100]
        }]}
    }],"error":null}}"#;

    let series = parse_chart_response("AAPL", body).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.rows()[0].date, date(2023, 2, 9));
    assert_eq!(series.rows()[0].extras, vec![0.0, 0.0]);
    assert_eq!(series.rows()[1].date, date(2023, 2, 10));
    assert_eq!(series.rows()[1].extras, vec![0.23, 4.0]);
}

#[test]
fn partially_missing_prices_become_nan() {
    let body = r#"{"chart":{"result":[{
        "meta":{"gmtoffset":0},
        "timestamp":[1672756200],
        "indicators":{"quote":[{"open":[null],"high":[130.9],"low":[124.17],"close":[125.07],"volume":[null]}]}
    }],"error":null}}"#;
    let series = parse_chart_response("AAPL", body).unwrap();
    assert_eq!(series.len(), 1);
    assert!(series.rows()[0].open.is_nan());
    assert_eq!(series.rows()[0].volume, 0);
}

#[test]
fn invalid_symbol_names_the_symbol() {
    let err = parse_chart_response("ZZZINVALID", &fixture("zzzinvalid_chart.json")).unwrap_err();
    assert_eq!(err.symbol, "ZZZINVALID");
    assert!(matches!(err.kind, FetchErrorKind::SymbolNotFound));
    assert!(err.to_string().contains("ZZZINVALID"));

    let err =
        parse_quote_summary("ZZZINVALID", &fixture("zzzinvalid_quote_summary.json")).unwrap_err();
    assert!(err.is_symbol_not_found());
}

#[test]
fn quote_summary_flattens_into_expected_fields() {
    let meta = parse_quote_summary("AAPL", &fixture("aapl_quote_summary.json")).unwrap();

    assert_eq!(meta.text("longName").as_deref(), Some("Apple Inc."));
    assert_eq!(meta.text("sector").as_deref(), Some("Technology"));
    assert_eq!(meta.text("industry").as_deref(), Some("Consumer Electronics"));
    // price module is consulted before summaryDetail
    assert_eq!(meta.number("marketCap"), Some(2_079_818_170_368.0));
    // summaryDetail is consulted before defaultKeyStatistics
    assert_eq!(meta.number("forwardPE"), Some(22.312233));
    assert_eq!(meta.number("dividendYield"), Some(0.0071));
    assert_eq!(meta.number("fiftyTwoWeekHigh"), Some(179.61));
    assert_eq!(meta.number("fiftyTwoWeekLow"), Some(124.17));
    assert!(!meta.contains("maxAge"));
    assert!(!meta.contains("companyOfficers"));
}

#[test]
fn quote_summary_feeds_metrics_table() {
    let meta = parse_quote_summary("AAPL", &fixture("aapl_quote_summary.json")).unwrap();
    let rows = build_metrics_table(&meta);
    let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "Apple Inc.",
            "Technology",
            "Consumer Electronics",
            "$2,079,818,170,368",
            "22.31",
            "0.71%",
            "$179.61",
            "$124.17",
        ]
    );
}

#[test]
fn etf_without_profile_or_pe() {
    let meta = parse_quote_summary("SPY", &fixture("etf_quote_summary.json")).unwrap();
    let rows = build_metrics_table(&meta);
    let value = |label: &str| {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.clone())
            .unwrap()
    };
    assert_eq!(value("Company Name"), "SPDR S&P 500 ETF Trust");
    assert_eq!(value("Sector"), "N/A");
    assert_eq!(value("Industry"), "N/A");
    assert_eq!(value("Market Cap"), "$0");
    assert_eq!(value("Forward P/E"), "N/A");
    assert_eq!(value("Dividend Yield"), "1.66%");
}
