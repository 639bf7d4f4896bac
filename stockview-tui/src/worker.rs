//! Background worker thread: every network fetch runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each fetch
//! carries a request id; when several fetches queue up while one is running,
//! only the newest is executed.

use std::io;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use stockview_core::{run_cycle, DashboardRequest, DashboardView, DataProvider, ViewOptions};
use tracing::{debug, warn};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch {
        request_id: u64,
        request: DashboardRequest,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Fetched {
        request_id: u64,
        /// The view on success, the error's display text on failure.
        result: Result<Box<DashboardView>, String>,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: Arc<dyn DataProvider>,
    options: ViewOptions,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stockview-worker".into())
        .spawn(move || worker_loop(provider.as_ref(), options, rx, tx))
}

fn worker_loop(
    provider: &dyn DataProvider,
    options: ViewOptions,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    loop {
        let (request_id, request) = match rx.recv() {
            Ok(WorkerCommand::Fetch {
                request_id,
                request,
            }) => (request_id, request),
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
        };

        let Some((request_id, request)) = newest_fetch(&rx, request_id, request) else {
            break;
        };

        debug!(request_id, symbol = %request.symbol, "worker fetching");
        let result = run_cycle(provider, &request, &options)
            .map(Box::new)
            .map_err(|e| {
                warn!(request_id, error = %e, "fetch cycle failed");
                e.to_string()
            });

        if tx.send(WorkerResponse::Fetched { request_id, result }).is_err() {
            // UI hung up.
            break;
        }
    }
}

/// Drain already-queued commands so superseded fetches are never run.
/// Returns `None` if a shutdown is queued.
fn newest_fetch(
    rx: &Receiver<WorkerCommand>,
    mut request_id: u64,
    mut request: DashboardRequest,
) -> Option<(u64, DashboardRequest)> {
    loop {
        match rx.try_recv() {
            Ok(WorkerCommand::Fetch {
                request_id: id,
                request: newer,
            }) => {
                debug!(skipped = request_id, "fetch superseded before start");
                request_id = id;
                request = newer;
            }
            Ok(WorkerCommand::Shutdown) => return None,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                return Some((request_id, request))
            }
        }
    }
}
