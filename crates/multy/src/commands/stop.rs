use multy_core::{Command, pid};
use multy_windows::{ipc, process};

pub fn execute() {
    // Try graceful shutdown via IPC first.
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.is_ok() => {
                println!("Multy stopped.");
                return;
            }
            Ok(response) => {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or("unknown error".into())
                );
                std::process::exit(1);
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // The pipe is gone but the process may still be alive.
    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => match process::kill_process(pid) {
            Ok(()) => {
                let _ = pid::remove_pid_file();
                println!("Multy stopped (killed PID {pid}).");
            }
            Err(e) => {
                eprintln!("Error: failed to kill process {pid}: {e}");
                std::process::exit(1);
            }
        },
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("Multy is not running (cleaned up stale PID file).");
        }
        _ => println!("Multy is not running."),
    }
}
