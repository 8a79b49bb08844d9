//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{ProcessError, SubmissionController};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command, reporting queue problems through `status`. Returns whether it was queued.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            false
        }
    }
}

/// Submit action: validates through the controller and hands the request to the backend.
/// A request that cannot be queued fails the attempt right away instead of spinning forever.
pub fn submit_draft(
    controller: &mut SubmissionController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    let request = match controller.submit() {
        Ok(request) => request,
        Err(_) => return,
    };

    let attempt = request.attempt;
    let queued = dispatch_backend_command(
        cmd_tx,
        BackendCommand::Classify {
            attempt,
            email_content: request.email_content,
        },
        status,
    );
    if queued {
        *status = "Processing...".to_string();
    } else {
        controller.on_failure(attempt, ProcessError::transport(status.clone()));
    }
}

pub fn clear_form(
    controller: &mut SubmissionController,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) {
    if let Some(attempt) = controller.current_attempt() {
        dispatch_backend_command(cmd_tx, BackendCommand::Abandon { attempt }, status);
    }
    controller.clear();
}
