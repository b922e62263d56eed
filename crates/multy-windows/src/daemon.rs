use multy_core::config;
use multy_core::log::{self, LogTarget};
use multy_core::pid::{self, PidError};

use crate::ipc::IpcError;

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_types.rs"]
mod daemon_types;

/// Errors that end the daemon before or during its main loop.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error(transparent)]
    Pid(#[from] PidError),

    #[error(transparent)]
    Ipc(#[from] IpcError),
}

/// Runs the multy daemon until a `Stop` command (or Ctrl+C).
///
/// The IPC listener runs on its own thread; the calling thread owns the
/// services and executes every command in arrival order.
pub fn run() -> Result<(), DaemonError> {
    let config = config::load();
    let log_file = log::init(&config.logging, LogTarget::File);

    pid::write_pid_file()?;
    tracing::info!(
        pid = std::process::id(),
        log_file = ?log_file,
        "daemon started"
    );

    let result = daemon_loop::daemon_loop(&config);

    if let Err(e) = pid::remove_pid_file() {
        tracing::warn!("failed to remove PID file: {e}");
    }
    tracing::info!("daemon stopped");

    result
}
