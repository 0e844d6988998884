//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use client_core::{load_catering_companies, CompanyDirectory, LOAD_FAILURE_PREFIX};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub const WORKER_READY_MESSAGE: &str = "Backend worker ready";

/// Starts the backend worker thread. It owns a tokio runtime and spawns one
/// task per load; tasks are never cancelled, stale results are filtered out
/// by the view state when they arrive.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    directory: Arc<dyn CompanyDirectory>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                fail_pending_loads(&cmd_rx, &ui_tx, "backend worker unavailable");
                return;
            }
        };

        let _ = ui_tx.send(UiEvent::Info(WORKER_READY_MESSAGE.to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::LoadCompanies { ticket } => {
                    tracing::info!(
                        generation = ticket.generation.0,
                        context = %ticket.context,
                        "backend: load_companies"
                    );
                    let directory = Arc::clone(&directory);
                    let ui_tx = ui_tx.clone();
                    runtime.spawn(async move {
                        let result = load_catering_companies(directory.as_ref()).await;
                        // Blocks only while the UI queue is full; the UI drains it every frame.
                        if ui_tx
                            .send(UiEvent::CompaniesLoaded { ticket, result })
                            .is_err()
                        {
                            tracing::warn!("backend: ui event queue closed, load result dropped");
                        }
                    });
                }
            }
        }

        tracing::info!("backend command channel closed; worker exiting");
    })
}

/// Answers every load still queued (and every later one) with a failure, so
/// no view waits on a worker that cannot run. Returns when the queue closes.
fn fail_pending_loads(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::LoadCompanies { ticket } => {
                tracing::warn!(generation = ticket.generation.0, "backend: failing load, {reason}");
                let result = Err(format!("{LOAD_FAILURE_PREFIX}: {reason}"));
                if ui_tx
                    .send(UiEvent::CompaniesLoaded { ticket, result })
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}
