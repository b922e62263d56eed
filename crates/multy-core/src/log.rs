//! `tracing` subscriber setup.
//!
//! The daemon writes to `~/.config/multy/logs/multy.log`. When the file
//! is larger than the configured size at startup it is moved to
//! `multy.log.1` (one backup kept). Foreground commands log to stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_NAME: &str = "multy.log";
const BACKUP_FILE_NAME: &str = "multy.log.1";

/// Logging configuration (`[logging]` in `config.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether the daemon writes a log file. Defaults to `true`.
    pub enabled: bool,
    /// Minimum level: "trace", "debug", "info", "warn" or "error".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Size in megabytes above which the log is rotated at startup.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The rotating daemon log file. Falls back to stderr when the file
    /// cannot be opened.
    File,
}

/// Returns the log file path: `~/.config/multy/logs/multy.log`.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|d| d.join("logs").join(LOG_FILE_NAME))
}

/// Installs the global subscriber. Call once per process.
///
/// Returns the log file path when logging to a file.
pub fn init(config: &LogConfig, target: LogTarget) -> Option<PathBuf> {
    let file = match target {
        LogTarget::File if config.enabled => log_path().and_then(|path| {
            let file = open_log(&path, config.max_file_mb * 1024 * 1024)?;
            Some((path, file))
        }),
        _ => None,
    };

    let filter = env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);
    match file {
        Some((path, file)) => {
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_thread_names(true)
                .with_writer(Mutex::new(file));
            let _ = registry.with(layer).try_init();
            Some(path)
        }
        None => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr);
            let _ = registry.with(layer).try_init();
            None
        }
    }
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log(path: &Path, max_bytes: u64) -> Option<File> {
    let dir = path.parent()?;
    fs::create_dir_all(dir).ok()?;
    rotate_if_needed(path, max_bytes);
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Moves an oversized log to its `.1` backup, replacing any older one.
fn rotate_if_needed(path: &Path, max_bytes: u64) {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if max_bytes == 0 || size < max_bytes {
        return;
    }
    let _ = fs::rename(path, path.with_file_name(BACKUP_FILE_NAME));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("multy-log-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn oversized_log_is_rotated() {
        // Arrange
        let dir = scratch_dir("rotate");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, vec![b'x'; 64]).unwrap();

        // Act
        rotate_if_needed(&path, 32);

        // Assert
        assert!(!path.exists());
        assert_eq!(fs::read(dir.join(BACKUP_FILE_NAME)).unwrap().len(), 64);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn small_log_is_kept() {
        // Arrange
        let dir = scratch_dir("keep");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, b"short").unwrap();

        // Act
        rotate_if_needed(&path, 1024);

        // Assert
        assert!(path.exists());
        assert!(!dir.join(BACKUP_FILE_NAME).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
