use std::sync::Arc;
use std::sync::mpsc;

use multy_core::log::{self, LogTarget};
use multy_core::{Monitor, config};
use multy_windows::{Win32ShellHook, Win32WindowManager, ctrl_c};

/// Runs a monitor session in this console until Ctrl+C.
///
/// Every classified notification is logged to stderr, so this doubles
/// as a way to see what the shell reports for a window.
pub fn execute(keyword: Option<String>) {
    let mut config = config::load();
    if config.logging.level == "info" {
        config.logging.level = "debug".into();
    }
    log::init(&config.logging, LogTarget::Stderr);

    let keyword = keyword.unwrap_or(config.monitor.keyword);
    let monitor = Monitor::new(Arc::new(Win32WindowManager), Arc::new(Win32ShellHook));

    let target = match monitor.start(&keyword) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "Watching '{}' ({}). Press Ctrl+C to stop.",
        target.title, target.handle
    );

    let (tx, rx) = mpsc::channel();
    if let Err(e) = ctrl_c::set_handler(tx) {
        eprintln!("Error: could not install Ctrl+C handler: {e}");
        std::process::exit(1);
    }
    let _ = rx.recv();

    if let Err(e) = monitor.stop() {
        tracing::warn!("stop failed: {e}");
    }
    println!("Stopped.");
}
