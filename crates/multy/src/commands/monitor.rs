use multy_core::{Command, config};

use super::send;

/// Starts monitoring, falling back to the configured keyword.
pub fn start(keyword: Option<String>) {
    let keyword = keyword.unwrap_or_else(|| config::load().monitor.keyword);
    send::execute(&Command::StartMonitoring { keyword });
}
