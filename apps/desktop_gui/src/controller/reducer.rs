//! State transitions of the directory view: context changes start loads,
//! backend events complete them.

use client_core::{CompanyViewState, LoadGeneration, LoadOutcome, LOAD_FAILURE_PREFIX};
use crossbeam_channel::Sender;
use shared::domain::ContextId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

/// Starts a load if `context` differs from the one on screen. A load that
/// cannot be queued is completed immediately as a failure so the view never
/// stays in the loading phase.
pub fn request_context(
    view: &mut CompanyViewState,
    context: &ContextId,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> Option<LoadGeneration> {
    let ticket = view.sync_context(context)?;
    let generation = ticket.generation;
    tracing::info!(generation = generation.0, %context, "context changed; loading companies");

    let cmd = BackendCommand::LoadCompanies {
        ticket: ticket.clone(),
    };
    if let Err(err) = dispatch_backend_command(cmd_tx, cmd, status) {
        view.complete_load(
            &ticket,
            Err(format!("{LOAD_FAILURE_PREFIX}: {}", err.message())),
        );
    }
    Some(generation)
}

pub fn apply_ui_event(view: &mut CompanyViewState, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::CompaniesLoaded { ticket, result } => {
            let loaded = result.as_ref().map(Vec::len).ok();
            if view.complete_load(&ticket, result) == LoadOutcome::Applied {
                *status = match loaded {
                    Some(count) => format!(
                        "Loaded {count} catering {} for {}",
                        if count == 1 { "company" } else { "companies" },
                        ticket.context
                    ),
                    None => format!("Load failed for {}", ticket.context),
                };
            }
        }
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::Error(err) => {
            tracing::error!(context = ?err.context(), "{}", err.message());
            *status = err.status_line();
        }
    }
}
