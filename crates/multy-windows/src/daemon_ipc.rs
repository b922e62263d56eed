use std::sync::mpsc;

use multy_core::ipc::{Command, Response};

use crate::ipc::{IpcError, PipeServer};

use super::daemon_types::{DaemonMsg, ResponseSender};

/// Accepts IPC connections in a loop and forwards commands to the
/// main daemon thread. Returns after relaying a `Stop`.
pub(super) fn ipc_loop(tx: mpsc::Sender<DaemonMsg>) {
    loop {
        let server = match PipeServer::create() {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("IPC listener stopped: {e}");
                let _ = tx.send(DaemonMsg::Shutdown);
                return;
            }
        };

        let command = match server.accept_command() {
            Ok(cmd) => cmd,
            Err(IpcError::Json(e)) => {
                tracing::warn!("rejected malformed request: {e}");
                let response = Response::error_message("INVALID_REQUEST", e.to_string());
                if let Err(e) = server.send_response(&response) {
                    tracing::debug!("failed to send error response: {e}");
                }
                continue;
            }
            Err(e) => {
                tracing::warn!("error reading command: {e}");
                continue;
            }
        };

        tracing::debug!(?command, "command received");
        let (reply_tx, reply_rx): (ResponseSender, _) = mpsc::channel();
        let is_stop = matches!(command, Command::Stop);

        if tx.send(DaemonMsg::Command(command, reply_tx)).is_err() {
            return;
        }

        if let Ok(response) = reply_rx.recv()
            && let Err(e) = server.send_response(&response)
        {
            tracing::warn!("failed to send response: {e}");
        }

        if is_stop {
            return;
        }
    }
}
