//! Yahoo Finance data provider.
//!
//! Daily OHLCV rows come from the v8 chart API, company metadata from the v10
//! quoteSummary API. quoteSummary needs a session cookie plus a "crumb" token,
//! so a fetch is four requests: chart, cookie, crumb, summary. Any failure
//! fails the whole fetch; nothing is retried.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Parsing lives in two public pure functions so it can be pinned
//! down by fixtures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::metadata::CompanyMetadata;
use super::provider::{DataProvider, FetchError, FetchErrorKind, FetchResult};
use super::series::{PriceRow, PriceSeries};
use crate::config::ProviderConfig;

/// Pass-through columns Yahoo supplies alongside OHLCV.
pub const DIVIDENDS_COLUMN: &str = "Dividends";
pub const STOCK_SPLITS_COLUMN: &str = "Stock Splits";

/// quoteSummary modules, in precedence order when flattening.
const SUMMARY_MODULES: [&str; 4] = ["price", "summaryProfile", "summaryDetail", "defaultKeyStatistics"];

// ─── Chart API response ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    events: ChartEvents,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

// ─── quoteSummary API response ──────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<Map<String, Value>>>,
    error: Option<ApiError>,
}

fn format_changed(symbol: &str, msg: impl Into<String>) -> FetchError {
    FetchError::new(symbol, FetchErrorKind::ResponseFormatChanged(msg.into()))
}

fn api_error(symbol: &str, err: ApiError) -> FetchError {
    if err.code == "Not Found" {
        FetchError::new(symbol, FetchErrorKind::SymbolNotFound)
    } else {
        format_changed(symbol, format!("{}: {}", err.code, err.description))
    }
}

/// Exchange-local trading date for a Yahoo epoch timestamp.
fn trading_date(ts: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts + gmtoffset, 0).map(|dt| dt.naive_utc().date())
}

/// Parse a v8 chart response body into a daily series.
///
/// A result without timestamps means no trading days in range and yields an
/// empty series. Rows with every OHLCV value missing are dropped.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<PriceSeries, FetchError> {
    let resp: ChartResponse = serde_json::from_str(body)
        .map_err(|e| format_changed(symbol, format!("failed to parse chart response: {e}")))?;

    if let Some(err) = resp.chart.error {
        return Err(api_error(symbol, err));
    }

    let data = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| format_changed(symbol, "chart result is empty"))?;

    let extra_columns = vec![DIVIDENDS_COLUMN.to_string(), STOCK_SPLITS_COLUMN.to_string()];

    let Some(timestamps) = data.timestamp else {
        return Ok(PriceSeries::empty(symbol, extra_columns));
    };

    let gmtoffset = data.meta.gmtoffset;
    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

    let dividends: HashMap<NaiveDate, f64> = data
        .events
        .dividends
        .values()
        .filter_map(|d| trading_date(d.date, gmtoffset).map(|date| (date, d.amount)))
        .collect();
    let splits: HashMap<NaiveDate, f64> = data
        .events
        .splits
        .values()
        .filter(|s| s.denominator != 0.0)
        .filter_map(|s| {
            trading_date(s.date, gmtoffset).map(|date| (date, s.numerator / s.denominator))
        })
        .collect();

    let mut rows = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = trading_date(ts, gmtoffset)
            .ok_or_else(|| format_changed(symbol, format!("invalid timestamp: {ts}")))?;

        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten();

        // Skip bars where all OHLCV are None (holidays/non-trading days)
        if open.is_none() && high.is_none() && low.is_none() && close.is_none() && volume.is_none()
        {
            continue;
        }

        rows.push(PriceRow {
            date,
            open: open.unwrap_or(f64::NAN),
            high: high.unwrap_or(f64::NAN),
            low: low.unwrap_or(f64::NAN),
            close: close.unwrap_or(f64::NAN),
            volume: volume.unwrap_or(0),
            extras: vec![
                dividends.get(&date).copied().unwrap_or(0.0),
                splits.get(&date).copied().unwrap_or(0.0),
            ],
        });
    }

    Ok(PriceSeries::from_rows(symbol, extra_columns, rows))
}

/// Unwrap Yahoo's `{"raw": .., "fmt": ..}` wrappers; drop values that carry nothing.
fn flatten_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::Object(obj) => obj.get("raw").filter(|raw| !raw.is_null()).cloned(),
        scalar => Some(scalar.clone()),
    }
}

/// Parse a v10 quoteSummary response body into a flat metadata map.
///
/// Modules are merged in [`SUMMARY_MODULES`] order; the first module to supply
/// a key wins.
pub fn parse_quote_summary(symbol: &str, body: &str) -> Result<CompanyMetadata, FetchError> {
    let resp: SummaryResponse = serde_json::from_str(body)
        .map_err(|e| format_changed(symbol, format!("failed to parse quoteSummary response: {e}")))?;

    if let Some(err) = resp.quote_summary.error {
        return Err(api_error(symbol, err));
    }

    let result = resp
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| FetchError::new(symbol, FetchErrorKind::SymbolNotFound))?;

    let mut metadata = CompanyMetadata::new();
    for module in SUMMARY_MODULES {
        let Some(Value::Object(fields)) = result.get(module) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" || metadata.contains(key) {
                continue;
            }
            if let Some(v) = flatten_value(value) {
                metadata.insert(key.clone(), v);
            }
        }
    }
    Ok(metadata)
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    config: ProviderConfig,
}

impl YahooProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .cookie_store(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Chart API query window for an inclusive date range.
    fn chart_period(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
        let start_ts = start.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
        let end_ts = end.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc().timestamp());
        // and_hms_opt only fails for out-of-range times, never for these constants
        (start_ts.unwrap_or_default(), end_ts.unwrap_or_default())
    }

    /// GET a URL and return its body. A 404 body is still returned: Yahoo
    /// reports unknown symbols as JSON with a "Not Found" error code.
    fn get_body(
        &self,
        symbol: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| FetchError::new(symbol, FetchErrorKind::NetworkUnreachable(e.to_string())))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FetchError::new(
                symbol,
                FetchErrorKind::AuthenticationRequired("Yahoo Finance rejected the session".into()),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::new(symbol, FetchErrorKind::RateLimited));
        }
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::new(symbol, FetchErrorKind::Http(status.as_u16())));
        }

        resp.text()
            .map_err(|e| FetchError::new(symbol, FetchErrorKind::NetworkUnreachable(e.to_string())))
    }

    fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, FetchError> {
        let (period1, period2) = Self::chart_period(start, end);
        let url = format!("{}/v8/finance/chart/{symbol}", self.config.chart_base_url);
        debug!(%url, period1, period2, "requesting chart");
        let body = self.get_body(
            symbol,
            &url,
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".into()),
                ("events", "div|split".into()),
                ("includeAdjustedClose", "true".into()),
            ],
        )?;
        parse_chart_response(symbol, &body)
    }

    /// Establish a session cookie and obtain the crumb quoteSummary requires.
    fn fetch_crumb(&self, symbol: &str) -> Result<String, FetchError> {
        debug!(url = %self.config.cookie_url, "requesting session cookie");
        // Status is irrelevant; the response only has to set the cookie.
        self.client
            .get(&self.config.cookie_url)
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .map_err(|e| FetchError::new(symbol, FetchErrorKind::NetworkUnreachable(e.to_string())))?;

        debug!(url = %self.config.crumb_url, "requesting crumb");
        let resp = self
            .client
            .get(&self.config.crumb_url)
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .map_err(|e| FetchError::new(symbol, FetchErrorKind::NetworkUnreachable(e.to_string())))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::new(symbol, FetchErrorKind::RateLimited));
        }
        if !resp.status().is_success() {
            return Err(FetchError::new(
                symbol,
                FetchErrorKind::AuthenticationRequired(format!(
                    "crumb request returned HTTP {}",
                    resp.status().as_u16()
                )),
            ));
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::new(symbol, FetchErrorKind::NetworkUnreachable(e.to_string())))?;
        let crumb = body.trim();
        if crumb.is_empty() || crumb.len() >= 100 || crumb.contains(' ') || crumb.contains('<') {
            return Err(FetchError::new(
                symbol,
                FetchErrorKind::AuthenticationRequired("no usable crumb in response".into()),
            ));
        }
        Ok(crumb.to_string())
    }

    fn fetch_metadata(&self, symbol: &str) -> Result<CompanyMetadata, FetchError> {
        let crumb = self.fetch_crumb(symbol)?;
        let url = format!(
            "{}/v10/finance/quoteSummary/{symbol}",
            self.config.summary_base_url
        );
        debug!(%url, "requesting quoteSummary");
        let body = self.get_body(
            symbol,
            &url,
            &[("modules", SUMMARY_MODULES.join(",")), ("crumb", crumb)],
        )?;
        parse_quote_summary(symbol, &body)
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, FetchError> {
        let result = self
            .fetch_series(symbol, start, end)
            .and_then(|series| {
                let metadata = self.fetch_metadata(symbol)?;
                Ok(FetchResult { series, metadata })
            });

        match &result {
            Ok(r) => info!(
                symbol,
                rows = r.series.len(),
                fields = r.metadata.len(),
                "fetched"
            ),
            Err(e) => warn!(symbol, error = %e, "fetch failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_period_covers_whole_end_day() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();
        let (p1, p2) = YahooProvider::chart_period(start, end);
        assert_eq!(p1, 1_672_531_200);
        assert_eq!(p2, 1_673_395_199);
    }

    #[test]
    fn trading_date_applies_gmt_offset() {
        // 2023-01-03 04:30 UTC is still 2023-01-02 in New York (UTC-5)
        let ts = 1_672_720_200;
        assert_eq!(
            trading_date(ts, -18_000),
            NaiveDate::from_ymd_opt(2023, 1, 2)
        );
        assert_eq!(trading_date(ts, 0), NaiveDate::from_ymd_opt(2023, 1, 3));
    }

    #[test]
    fn flatten_value_unwraps_raw() {
        let wrapped: Value = serde_json::json!({"raw": 28.5, "fmt": "28.50"});
        assert_eq!(flatten_value(&wrapped), Some(serde_json::json!(28.5)));
        assert_eq!(flatten_value(&serde_json::json!({})), None);
        assert_eq!(flatten_value(&serde_json::json!([])), None);
        assert_eq!(flatten_value(&Value::Null), None);
        assert_eq!(
            flatten_value(&serde_json::json!("Technology")),
            Some(serde_json::json!("Technology"))
        );
    }

    #[test]
    fn chart_without_timestamps_is_empty_series() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":-18000},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let series = parse_chart_response("AAPL", body).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.extra_columns, vec!["Dividends", "Stock Splits"]);
    }

    #[test]
    fn chart_not_found_is_symbol_not_found() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("ZZZINVALID", body).unwrap_err();
        assert!(err.is_symbol_not_found());
        assert_eq!(err.symbol, "ZZZINVALID");
    }

    #[test]
    fn garbage_body_is_format_change() {
        let err = parse_chart_response("AAPL", "<html>oops</html>").unwrap_err();
        assert!(matches!(err.kind, FetchErrorKind::ResponseFormatChanged(_)));
    }

    #[test]
    fn summary_first_module_wins() {
        let body = r#"{"quoteSummary":{"result":[{
            "price":{"maxAge":1,"marketCap":{"raw":100,"fmt":"100"}},
            "summaryDetail":{"marketCap":{"raw":200,"fmt":"200"},"forwardPE":{}}
        }],"error":null}}"#;
        let meta = parse_quote_summary("AAPL", body).unwrap();
        assert_eq!(meta.number("marketCap"), Some(100.0));
        assert!(!meta.contains("forwardPE"));
        assert!(!meta.contains("maxAge"));
    }
}
