use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;
use stockview_core::data::yahoo::{parse_chart_response, parse_quote_summary};
use stockview_core::{
    render, CompanyMetadata, DashboardConfig, DashboardRequest, FetchResult, PriceSeries,
    ViewOptions,
};
use stockview_tui::app::{AppState, FETCH_FAILED_WARNING};
use stockview_tui::ui;
use stockview_tui::worker::{WorkerCommand, WorkerResponse};

fn core_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../stockview-core/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {path:?}: {e}"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, &DashboardConfig::default(), date(2023, 1, 10));
    (app, cmd_rx, resp_tx)
}

fn screen(app: &AppState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buf = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}

fn deliver(app: &mut AppState, result: FetchResult, symbol: &str) {
    app.request_fetch();
    let request = DashboardRequest::new(symbol, date(2023, 1, 1), date(2023, 1, 10));
    let view = render(&request, result, &ViewOptions::default()).unwrap();
    app.handle_response(WorkerResponse::Fetched {
        request_id: app.latest_request_id,
        result: Ok(Box::new(view)),
    });
}

#[test]
fn startup_screen_shows_form_and_title() {
    let (app, _rx, _tx) = new_app();
    let text = screen(&app, 120, 30);

    assert!(text.contains("Stock Data Visualization App"));
    assert!(text.contains("Symbol: AAPL"));
    assert!(text.contains("2022-01-10"));
    assert!(text.contains("2023-01-10"));
    assert!(text.contains("[ Fetch Data ]"));
    assert!(text.contains("No data loaded"));
}

#[test]
fn loaded_view_renders_every_section() {
    let (mut app, _rx, _tx) = new_app();
    let fetched = FetchResult {
        series: parse_chart_response("AAPL", &core_fixture("aapl_chart_2023-01-01_2023-01-10.json"))
            .unwrap(),
        metadata: parse_quote_summary("AAPL", &core_fixture("aapl_quote_summary.json")).unwrap(),
    };
    deliver(&mut app, fetched, "AAPL");

    let text = screen(&app, 160, 40);
    assert!(text.contains("Key Information for AAPL"));
    assert!(text.contains("Apple Inc."));
    assert!(text.contains("$2,079,818,170,368"));
    assert!(text.contains("Recent Stock Data for AAPL"));
    assert!(text.contains("2023-01-10"));
    assert!(text.contains("Stock Price History for AAPL"));
    assert!(text.contains("6 bars"));
    assert!(text.contains("AAPL_stock_data.csv"));
    assert!(text.contains("Loaded 6 rows for AAPL"));
}

#[test]
fn empty_range_renders_without_panic() {
    let (mut app, _rx, _tx) = new_app();
    let fetched = FetchResult {
        series: PriceSeries::empty("AAPL", vec![]),
        metadata: CompanyMetadata::new().with("longName", json!("Apple Inc.")),
    };
    deliver(&mut app, fetched, "AAPL");

    let text = screen(&app, 120, 30);
    assert!(text.contains("[No Data]"));
    assert!(text.contains("No trading days"));
    assert!(text.contains("N/A"));
}

#[test]
fn failed_fetch_shows_warning_and_clears_view() {
    let (mut app, _rx, _tx) = new_app();
    deliver(
        &mut app,
        FetchResult {
            series: PriceSeries::empty("AAPL", vec![]),
            metadata: CompanyMetadata::new(),
        },
        "AAPL",
    );
    assert!(app.view.is_some());

    app.request_fetch();
    app.handle_response(WorkerResponse::Fetched {
        request_id: app.latest_request_id,
        result: Err("error fetching data for ZZZINVALID: symbol not found".into()),
    });

    let text = screen(&app, 200, 30);
    assert!(text.contains(FETCH_FAILED_WARNING));
    assert!(!text.contains("Key Information for"));
}

#[test]
fn small_terminal_does_not_panic() {
    let (mut app, _rx, _tx) = new_app();
    let fetched = FetchResult {
        series: parse_chart_response("AAPL", &core_fixture("aapl_chart_2023-01-01_2023-01-10.json"))
            .unwrap(),
        metadata: CompanyMetadata::new(),
    };
    deliver(&mut app, fetched, "AAPL");
    let _ = screen(&app, 20, 8);
}
