use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use multy_core::config::Config;
use multy_core::ipc::Command;
use multy_core::{
    ClickForwarder, ForegroundForcer, ForegroundGate, Services, ShellHook, WindowDirectory,
    WindowManager,
};

use crate::ipc::IpcError;
use crate::{ClickService, HotkeyService, Win32ShellHook, Win32WindowManager, ctrl_c};

use super::DaemonError;
use super::daemon_ipc;
use super::daemon_types::DaemonMsg;

/// The inner daemon loop, separated so cleanup always runs in `run()`.
pub(super) fn daemon_loop(config: &Config) -> Result<(), DaemonError> {
    let platform = Arc::new(Win32WindowManager);
    let wm: Arc<dyn WindowManager> = platform.clone();
    let hook: Arc<dyn ShellHook> = Arc::new(Win32ShellHook);

    let directory = WindowDirectory::new(wm.clone());
    let forcer = Arc::new(ForegroundForcer::new(wm.clone()));
    let gate = Arc::new(ForegroundGate::new(wm.clone(), &config.gate));
    if gate.is_enabled() {
        tracing::info!(keyword = %config.gate.keyword, "input automation limited to focused game windows");
    }
    let forwarder = ClickForwarder::new(
        directory.clone(),
        forcer.clone(),
        gate.clone(),
        platform,
        &config.click,
    );

    let click = ClickService::new(Arc::new(forwarder));
    let hotkeys = HotkeyService::new(directory, forcer, gate);
    let mut services = Services::new(wm, hook, Box::new(click), Box::new(hotkeys));

    services.register_configured_hotkeys(&config.hotkeys);
    if config.monitor.autostart {
        match services.monitor().start(&config.monitor.keyword) {
            Ok(target) => tracing::info!(title = %target.title, "monitor autostarted"),
            Err(e) => tracing::warn!(keyword = %config.monitor.keyword, "monitor autostart failed: {e}"),
        }
    }

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    let ipc_tx = tx.clone();
    let ipc_thread = thread::Builder::new()
        .name("multy-ipc".into())
        .spawn(move || daemon_ipc::ipc_loop(ipc_tx))
        .map_err(|e| DaemonError::Ipc(IpcError::Io(e)))?;

    spawn_ctrl_c_bridge(tx);

    let mut stopped_by_command = false;
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Command(command, reply_tx) => {
                let response = services.handle(&command);
                let _ = reply_tx.send(response);
                if matches!(command, Command::Stop) {
                    stopped_by_command = true;
                    break;
                }
            }
            DaemonMsg::Shutdown => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    services.shutdown();

    // The IPC thread is blocked in ConnectNamedPipe unless it relayed Stop.
    if stopped_by_command {
        let _ = ipc_thread.join();
    }

    Ok(())
}

/// Turns Ctrl+C into a `Shutdown` message when the daemon runs in a
/// console.
fn spawn_ctrl_c_bridge(tx: mpsc::Sender<DaemonMsg>) {
    let (ctrl_tx, ctrl_rx) = mpsc::channel();
    if let Err(e) = ctrl_c::set_handler(ctrl_tx) {
        tracing::debug!("Ctrl+C handler not installed: {e}");
        return;
    }

    let spawned = thread::Builder::new()
        .name("multy-ctrl-c".into())
        .spawn(move || {
            if ctrl_rx.recv().is_ok() {
                let _ = tx.send(DaemonMsg::Shutdown);
            }
        });
    if let Err(e) = spawned {
        tracing::debug!("Ctrl+C bridge not started: {e}");
    }
}
