use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::HotkeyBinding;
use crate::{ErrorCode, MonitorStatus, WindowRecord};

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\multy";

/// A command sent from the CLI to the daemon.
///
/// Serialized as one JSON line per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Start forcing the matching window to the foreground when it flashes.
    StartMonitoring { keyword: String },
    StopMonitoring,
    /// List titled top-level windows.
    ListWindows,
    /// Bring the first matching window to the foreground once.
    Focus { keyword: String },
    StartClickForwarding,
    StopClickForwarding,
    /// Add a hotkey, replacing any binding for the same key combination.
    RegisterHotkey { binding: HotkeyBinding },
    UnregisterHotkeys,
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    /// Stable error code when `status` is `error`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code: Option<String>,
    /// Window listing for `ListWindows`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub windows: Option<Vec<WindowRecord>>,
    /// Monitor state for `Status`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub monitor: Option<MonitorStatus>,
}

/// Status of a daemon response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with no message.
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
            code: None,
            windows: None,
            monitor: None,
        }
    }

    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }

    /// Creates an error response carrying the error's code and text.
    pub fn error(error: &(impl ErrorCode + fmt::Display)) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(error.to_string()),
            code: Some(error.error_code().to_owned()),
            ..Self::ok()
        }
    }

    /// Creates an error response for failures outside the error taxonomy
    /// (e.g. malformed requests).
    pub fn error_message(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            code: Some(code.to_owned()),
            ..Self::ok()
        }
    }

    pub fn with_windows(mut self, windows: Vec<WindowRecord>) -> Self {
        self.windows = Some(windows);
        self
    }

    pub fn with_monitor(mut self, monitor: MonitorStatus) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectoryError;

    #[test]
    fn command_is_tagged_by_name() {
        // Arrange
        let command = Command::StartMonitoring {
            keyword: "Dofus".into(),
        };

        // Act
        let json = serde_json::to_string(&command).unwrap();

        // Assert
        assert_eq!(json, r#"{"command":"StartMonitoring","keyword":"Dofus"}"#);
    }

    #[test]
    fn unit_command_parses_from_tag_only() {
        // Act
        let command: Command = serde_json::from_str(r#"{"command":"ListWindows"}"#).unwrap();

        // Assert
        assert_eq!(command, Command::ListWindows);
    }

    #[test]
    fn ok_response_omits_empty_fields() {
        // Act
        let json = serde_json::to_string(&Response::ok()).unwrap();

        // Assert
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn error_response_carries_code() {
        // Arrange
        let error = DirectoryError::NotFound {
            keyword: "Game".into(),
        };

        // Act
        let response = Response::error(&error);

        // Assert
        assert!(!response.is_ok());
        assert_eq!(response.code.as_deref(), Some("WINDOW_NOT_FOUND"));
        assert_eq!(
            response.message.as_deref(),
            Some("no window title contains 'Game'")
        );
    }

    #[test]
    fn status_response_reports_running_monitor() {
        // Arrange
        let response = Response::ok().with_monitor(MonitorStatus::Idle);

        // Act
        let json = serde_json::to_string(&response).unwrap();

        // Assert
        assert_eq!(json, r#"{"status":"ok","monitor":{"state":"idle"}}"#);
    }
}
