use std::sync::mpsc;

use multy_core::ipc::{Command, Response};

/// Internal message type for the main daemon thread.
pub(super) enum DaemonMsg {
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
    /// Ctrl+C, or the IPC listener could not continue.
    Shutdown,
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;
