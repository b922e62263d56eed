//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::core::BOOL;

/// Written once by `set_handler`, read by the callback.
static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Registers a handler that sends `()` on `tx` for Ctrl+C and Ctrl+Break.
///
/// Only the first registration in a process takes effect.
pub fn set_handler(tx: Sender<()>) -> windows::core::Result<()> {
    if SENDER.set(tx).is_err() {
        tracing::debug!("Ctrl+C handler already registered");
        return Ok(());
    }
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }
}

unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(());
        return BOOL(1);
    }
    BOOL(0)
}
