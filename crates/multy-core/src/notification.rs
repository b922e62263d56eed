//! Classification and deduplication of shell notifications.

use crate::WindowHandle;

/// Flag OR-ed into some shell codes to mark a variant of the base event
/// (e.g. `HSHELL_FLASH` is `HSHELL_REDRAW | HSHELL_HIGHBIT`).
pub const HSHELL_HIGHBIT: u32 = 0x8000;

pub const HSHELL_WINDOWCREATED: u32 = 1;
pub const HSHELL_WINDOWDESTROYED: u32 = 2;
pub const HSHELL_ACTIVATESHELLWINDOW: u32 = 3;
pub const HSHELL_WINDOWACTIVATED: u32 = 4;
pub const HSHELL_GETMINRECT: u32 = 5;
pub const HSHELL_REDRAW: u32 = 6;
pub const HSHELL_FLASH: u32 = HSHELL_REDRAW | HSHELL_HIGHBIT;
pub const HSHELL_RUDEAPPACTIVATED: u32 = HSHELL_WINDOWACTIVATED | HSHELL_HIGHBIT;

/// A single shell notification: the raw `wParam` code and the window
/// it concerns (`lParam`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationEvent {
    raw_code: u32,
    source: WindowHandle,
}

impl NotificationEvent {
    pub const fn new(raw_code: u32, source: WindowHandle) -> Self {
        Self { raw_code, source }
    }

    pub const fn raw_code(&self) -> u32 {
        self.raw_code
    }

    /// The event code with the high-bit variant flag masked off.
    pub const fn code(&self) -> u32 {
        self.raw_code & !HSHELL_HIGHBIT
    }

    pub const fn source(&self) -> WindowHandle {
        self.source
    }
}

/// What the monitor should do with a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// The notification concerns a window other than the tracked one.
    Foreign,
    /// Same code and window as the notification just before it.
    Duplicate,
    /// The tracked window became active. Informational only.
    Activated,
    /// The tracked window is asking for attention; force it to the
    /// foreground.
    ForceFocus,
    /// Any other code for the tracked window.
    Ignored(u32),
}

/// Decides the [`Reaction`] for each notification of one session.
///
/// Remembers only the `(code, window)` pair of the immediately preceding
/// notification for the tracked window. Notifications for other windows
/// are discarded before that slot is read or written, so a burst of
/// identical notifications triggers at most one reaction even when the
/// shell interleaves events for other windows.
#[derive(Debug)]
pub struct NotificationFilter {
    target: WindowHandle,
    last: Option<(u32, WindowHandle)>,
}

impl NotificationFilter {
    pub fn new(target: WindowHandle) -> Self {
        Self { target, last: None }
    }

    pub fn target(&self) -> WindowHandle {
        self.target
    }

    pub fn classify(&mut self, event: NotificationEvent) -> Reaction {
        if event.source() != self.target {
            return Reaction::Foreign;
        }

        let key = (event.code(), event.source());
        let repeated = self.last.replace(key) == Some(key);
        if repeated {
            return Reaction::Duplicate;
        }

        match event.code() {
            HSHELL_WINDOWACTIVATED => Reaction::Activated,
            HSHELL_REDRAW => Reaction::ForceFocus,
            other => Reaction::Ignored(other),
        }
    }
}
