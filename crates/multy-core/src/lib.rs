pub mod click;
pub mod config;
pub mod directory;
pub mod error;
pub mod focus;
pub mod forcer;
pub mod gate;
pub mod handle;
pub mod ipc;
pub mod keys;
pub mod log;
pub mod monitor;
pub mod notification;
pub mod pid;
pub mod platform;
pub mod service;

#[cfg(test)]
pub(crate) mod fake;

pub use click::ClickForwarder;
pub use directory::{WindowDirectory, WindowRecord};
pub use error::{
    ClickError, DirectoryError, ErrorCode, FocusError, HotkeyError, MonitorError, PlatformError,
};
pub use forcer::ForegroundForcer;
pub use gate::ForegroundGate;
pub use handle::WindowHandle;
pub use ipc::{Command, PIPE_NAME, Response};
pub use monitor::{Monitor, MonitorStatus, TrackedTarget};
pub use notification::{NotificationEvent, NotificationFilter, Reaction};
pub use platform::{
    MouseButton, NotificationPump, Point, PointerInput, PumpMessage, PumpStopper, Registration,
    ShellHook, WindowManager,
};
pub use service::{ClickControl, HotkeyControl, Services};
