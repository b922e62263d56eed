use multy_core::{Command, Response};

/// Sends a command to the running daemon, exiting with status 1 when the
/// daemon is unreachable.
pub fn request(command: &Command) -> Response {
    if !multy_windows::ipc::is_daemon_running() {
        eprintln!("Multy is not running. Start it with 'multy start'.");
        std::process::exit(1);
    }

    match multy_windows::ipc::send_command(command) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Failed to reach the daemon: {e}");
            std::process::exit(1);
        }
    }
}

/// Sends a command and prints the daemon's message.
pub fn execute(command: &Command) {
    let response = request(command);
    report(response);
}

/// Prints a response; an error response exits with status 1.
pub fn report(response: Response) {
    if response.is_ok() {
        if let Some(msg) = response.message {
            println!("{msg}");
        }
        return;
    }

    eprintln!(
        "Error: {}",
        response.message.unwrap_or("unknown error".into())
    );
    std::process::exit(1);
}
