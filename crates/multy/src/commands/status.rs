use multy_core::{Command, pid};
use multy_windows::{ipc, process};

use super::send;

pub fn execute() {
    if ipc::is_daemon_running() {
        send::execute(&Command::Status);
        return;
    }

    // Pipe isn't responding; a killed daemon may have left its PID file.
    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("Multy process exists (PID: {pid}) but is not responding.");
        } else {
            let _ = pid::remove_pid_file();
            println!("Multy is not running (cleaned up stale PID file).");
        }
    } else {
        println!("Multy is not running.");
    }
}
