use crate::WindowHandle;

/// Stable machine-readable classification shared by every error kind.
///
/// The code travels over IPC next to the human-readable message so the
/// CLI (or any other client) can branch on it without parsing text.
pub trait ErrorCode {
    /// Returns a stable SCREAMING_SNAKE_CASE identifier.
    fn error_code(&self) -> &'static str;

    /// Returns whether the error was caused by user input or misuse
    /// rather than by the OS.
    fn is_user_error(&self) -> bool;
}

/// A failed OS call, as reported by a [`crate::WindowManager`] or
/// [`crate::ShellHook`] implementation.
///
/// Components translate this into their own error kinds at their
/// boundary; it never reaches IPC clients directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct PlatformError {
    /// The OS entry point that failed (e.g. `EnumWindows`).
    pub operation: &'static str,
    /// OS-provided detail.
    pub message: String,
}

impl PlatformError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Errors from window enumeration and keyword resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to enumerate windows: {message}")]
    Enumeration { message: String },

    #[error("no window title contains '{keyword}'")]
    NotFound { keyword: String },
}

impl From<PlatformError> for DirectoryError {
    fn from(e: PlatformError) -> Self {
        Self::Enumeration {
            message: e.to_string(),
        }
    }
}

impl ErrorCode for DirectoryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Enumeration { .. } => "WINDOW_ENUMERATION_FAILED",
            Self::NotFound { .. } => "WINDOW_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the monitor start/stop state machine.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("monitor is already running for '{keyword}'")]
    AlreadyRunning { keyword: String },

    #[error("monitor is not running")]
    NotRunning,

    #[error("could not resolve window '{keyword}': {source}")]
    Resolution {
        keyword: String,
        #[source]
        source: DirectoryError,
    },

    #[error("failed to register shell hook: {message}")]
    Registration { message: String },
}

impl MonitorError {
    /// Returns whether start failed because no window matched the keyword.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Resolution {
                source: DirectoryError::NotFound { .. },
                ..
            }
        )
    }
}

impl ErrorCode for MonitorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning { .. } => "MONITOR_ALREADY_RUNNING",
            Self::NotRunning => "MONITOR_NOT_RUNNING",
            Self::Resolution { source, .. } => source.error_code(),
            Self::Registration { .. } => "SHELL_HOOK_REGISTRATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            Self::AlreadyRunning { .. } | Self::NotRunning => true,
            Self::Resolution { source, .. } => source.is_user_error(),
            Self::Registration { .. } => false,
        }
    }
}

/// Errors from focusing a window by keyword.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("window {handle} ('{title}') could not be brought to the foreground")]
    ActivationFailed { handle: WindowHandle, title: String },
}

impl ErrorCode for FocusError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Directory(e) => e.error_code(),
            Self::ActivationFailed { .. } => "FOREGROUND_ACTIVATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            Self::Directory(e) => e.is_user_error(),
            Self::ActivationFailed { .. } => false,
        }
    }
}

/// Errors from the middle-click forwarding service.
#[derive(Debug, thiserror::Error)]
pub enum ClickError {
    #[error("click forwarding is already running")]
    AlreadyRunning,

    #[error("click forwarding is not running")]
    NotRunning,

    #[error("failed to install mouse hook: {message}")]
    Hook { message: String },
}

impl ErrorCode for ClickError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "CLICK_ALREADY_RUNNING",
            Self::NotRunning => "CLICK_NOT_RUNNING",
            Self::Hook { .. } => "MOUSE_HOOK_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, Self::Hook { .. })
    }
}

/// Errors from global hotkey registration.
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("unknown key name: '{key}'")]
    UnknownKey { key: String },

    #[error("window keyword for hotkey '{key}' is empty")]
    EmptyWindow { key: String },

    #[error("failed to register hotkey: {message}")]
    Registration { message: String },
}

impl ErrorCode for HotkeyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKey { .. } => "HOTKEY_UNKNOWN_KEY",
            Self::EmptyWindow { .. } => "HOTKEY_EMPTY_WINDOW",
            Self::Registration { .. } => "HOTKEY_REGISTRATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, Self::Registration { .. })
    }
}
