//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// Queues `cmd` for the backend worker. On failure the reason is written to
/// `status` and returned.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();

    let reason = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return Ok(());
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "Backend command processor disconnected (possible startup/runtime failure)"
        }
    };

    tracing::warn!(command = cmd_name, "{reason}");
    let err = UiError::from_message(UiErrorContext::CommandQueue, reason);
    *status = err.status_line();
    Err(err)
}
