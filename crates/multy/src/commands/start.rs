use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use multy_core::pid;
use multy_windows::{ipc, process};

/// `CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP`: no console window, and
/// Ctrl+C in the CLI terminal does not reach the daemon.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

/// How long to wait for the daemon's pipe before giving up on it.
const READY_TIMEOUT: Duration = Duration::from_secs(3);

pub fn execute() {
    if ipc::is_daemon_running() {
        println!("Multy is already running.");
        return;
    }

    // Clean up a stale PID file from a previous unclean shutdown.
    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("Multy process exists (PID: {pid}) but is not responding.");
            return;
        }
        let _ = pid::remove_pid_file();
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the multy executable: {e}");
            std::process::exit(1);
        }
    };

    // Re-run ourselves with the hidden `daemon` subcommand, fully detached.
    let spawned = Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };
    let daemon_pid = child.id();
    let _ = child.try_wait();

    if wait_until_ready() {
        println!("Multy started (PID: {daemon_pid}).");
    } else {
        println!("Multy launched (PID: {daemon_pid}) but is not answering yet.");
    }
    if let Some(path) = multy_core::log::log_path() {
        println!("Log: {}", path.display());
    }
}

fn wait_until_ready() -> bool {
    let step = Duration::from_millis(100);
    let mut waited = Duration::ZERO;
    while waited < READY_TIMEOUT {
        if ipc::is_daemon_running() {
            return true;
        }
        thread::sleep(step);
        waited += step;
    }
    false
}
