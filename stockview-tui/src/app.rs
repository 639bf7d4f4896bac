//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{Duration, NaiveDate};
use stockview_core::{DashboardConfig, DashboardRequest, DashboardView};
use tracing::{debug, info, warn};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Shown whenever a fetch fails, followed by the cause.
pub const FETCH_FAILED_WARNING: &str =
    "Failed to fetch data. Please check the stock symbol and try again.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which form control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Start,
    End,
    Fetch,
}

impl Field {
    pub fn index(self) -> usize {
        match self {
            Field::Symbol => 0,
            Field::Start => 1,
            Field::End => 2,
            Field::Fetch => 3,
        }
    }

    fn from_index(i: usize) -> Field {
        match i % 4 {
            0 => Field::Symbol,
            1 => Field::Start,
            2 => Field::End,
            _ => Field::Fetch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Symbol => "Symbol",
            Field::Start => "Start Date",
            Field::End => "End Date",
            Field::Fetch => "Fetch Data",
        }
    }

    pub fn next(self) -> Field {
        Field::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Field {
        Field::from_index(self.index() + 3)
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::Start | Field::End)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Raw text of the input form, parsed only when a fetch is requested.
#[derive(Debug, Clone)]
pub struct FormState {
    pub symbol: String,
    pub start: String,
    pub end: String,
    pub focus: Field,
}

impl FormState {
    pub fn from_request(request: &DashboardRequest) -> Self {
        Self {
            symbol: request.symbol.clone(),
            start: request.start.format(DATE_FORMAT).to_string(),
            end: request.end.format(DATE_FORMAT).to_string(),
            focus: Field::Symbol,
        }
    }

    /// Text of the focused field, if it is editable.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Symbol => Some(&mut self.symbol),
            Field::Start => Some(&mut self.start),
            Field::End => Some(&mut self.end),
            Field::Fetch => None,
        }
    }

    /// Shift the focused date field by `days`. Unparseable text, or a step past
    /// the representable calendar, leaves the field alone.
    pub fn shift_date(&mut self, days: i64) -> bool {
        if !self.focus.is_date() {
            return false;
        }
        let Some(text) = self.focused_text_mut() else {
            return false;
        };
        let shifted = NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
            .ok()
            .zip(Duration::try_days(days))
            .and_then(|(date, delta)| date.checked_add_signed(delta));
        match shifted {
            Some(date) => {
                *text = date.format(DATE_FORMAT).to_string();
                true
            }
            None => false,
        }
    }

    /// Parse the form into a request, or a message naming the bad field.
    pub fn to_request(&self) -> Result<DashboardRequest, String> {
        if self.symbol.trim().is_empty() {
            return Err("Enter a stock symbol".into());
        }
        let start = parse_date(Field::Start, &self.start)?;
        let end = parse_date(Field::End, &self.end)?;
        Ok(DashboardRequest::new(&self.symbol, start, end))
    }
}

fn parse_date(field: Field, text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid {}: '{}' (expected YYYY-MM-DD)", field.label(), text))
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub form: FormState,
    /// Last successful render; cleared on failure.
    pub view: Option<DashboardView>,
    pub fetch_in_progress: bool,
    /// Id of the newest fetch sent to the worker.
    pub latest_request_id: u64,
    next_request_id: u64,
    pub status_message: Option<(String, StatusLevel)>,
    pub export_dir: PathBuf,
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        config: &DashboardConfig,
        today: NaiveDate,
    ) -> Self {
        let initial = DashboardRequest::default_for(today, config);
        Self {
            running: true,
            form: FormState::from_request(&initial),
            view: None,
            fetch_in_progress: false,
            latest_request_id: 0,
            next_request_id: 1,
            status_message: Some((
                "Enter a symbol and press Enter to fetch data".into(),
                StatusLevel::Info,
            )),
            export_dir: config.export_dir.clone(),
            worker_tx,
            worker_rx,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    /// Validate the form and hand a fetch to the worker. A bad form only
    /// produces a warning; the current view stays.
    pub fn request_fetch(&mut self) {
        let request = match self.form.to_request() {
            Ok(r) => r,
            Err(msg) => {
                self.set_warning(msg);
                return;
            }
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let symbol = request.symbol.clone();

        if self
            .worker_tx
            .send(WorkerCommand::Fetch {
                request_id,
                request,
            })
            .is_err()
        {
            self.set_error("Background worker is not running");
            return;
        }

        debug!(request_id, %symbol, "fetch requested");
        self.latest_request_id = request_id;
        self.fetch_in_progress = true;
        self.set_status(format!("Fetching {symbol}..."));
    }

    /// Apply a worker response. Responses for superseded requests are dropped.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Fetched { request_id, result } => {
                if request_id != self.latest_request_id {
                    debug!(request_id, latest = self.latest_request_id, "dropping stale response");
                    return;
                }
                self.fetch_in_progress = false;
                match result {
                    Ok(view) => {
                        info!(symbol = %view.request.symbol, rows = view.row_count, "view updated");
                        self.set_status(format!(
                            "Loaded {} rows for {}",
                            view.row_count, view.request.symbol
                        ));
                        self.view = Some(*view);
                    }
                    Err(cause) => {
                        warn!(%cause, "fetch failed");
                        self.view = None;
                        self.set_warning(format!("{FETCH_FAILED_WARNING} ({cause})"));
                    }
                }
            }
        }
    }

    /// "Download": write the current CSV artifact into the export directory.
    pub fn save_csv(&mut self) {
        let Some(view) = &self.view else {
            self.set_warning("Nothing to save yet: fetch data first");
            return;
        };
        let filename = view.csv.filename.clone();
        match view.csv.save_to(&self.export_dir) {
            Ok(path) => {
                info!(path = %path.display(), "csv saved");
                self.set_status(format!("Saved {}", path.display()));
            }
            Err(e) => self.set_error(format!("Failed to save {filename}: {e}")),
        }
    }
}
