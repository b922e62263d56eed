//! Capability traits for the OS window-management facilities.
//!
//! Every component receives these as injected trait objects instead of
//! calling OS entry points directly, so the whole core can run against
//! an in-memory window list in tests.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::{NotificationEvent, PlatformError, WindowHandle};

/// A point in screen or client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window enumeration, title lookup and foreground control.
pub trait WindowManager: Send + Sync {
    /// Visits every top-level window in OS enumeration order.
    ///
    /// Enumeration stops early when `visit` returns `Break`; that is not
    /// an error.
    fn for_each_window(
        &self,
        visit: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>,
    ) -> Result<(), PlatformError>;

    /// Returns the title text, or an empty string if the window has none.
    fn window_title(&self, handle: WindowHandle) -> String;

    fn is_minimized(&self, handle: WindowHandle) -> bool;

    /// Restores a minimized window to its previous placement.
    fn restore(&self, handle: WindowHandle);

    /// Returns the window that currently has the user's input, if any.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Asks the OS to make `handle` the foreground window.
    ///
    /// Returns `false` when the OS refuses (foreground lock).
    fn set_foreground(&self, handle: WindowHandle) -> bool;

    /// Returns the id of the thread that created the window, or 0.
    fn window_thread(&self, handle: WindowHandle) -> u32;

    /// Attaches (or detaches) the input queues of two threads.
    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool;
}

/// Mouse button events that click forwarding posts to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    LeftDown,
    LeftUp,
}

/// Cursor placement and synthetic button messages.
pub trait PointerInput: Send + Sync {
    /// Converts screen coordinates to the window's client coordinates.
    fn screen_to_client(&self, handle: WindowHandle, point: Point) -> Option<Point>;

    fn set_cursor_pos(&self, point: Point) -> bool;

    /// Delivers a button message at client coordinates to `handle`.
    fn post_button(&self, handle: WindowHandle, button: MouseButton, client: Point) -> bool;
}

/// One step of a shell-hook message pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpMessage {
    /// A shell notification addressed to the registered listener.
    Notification(NotificationEvent),
    /// Message retrieval failed; the pump may continue.
    Error(String),
    /// The termination signal was received.
    Quit,
}

/// A registered shell-hook listener, owned by the pump thread.
pub trait NotificationPump {
    /// Blocks until the next shell notification, error or quit signal.
    fn next_message(&mut self) -> PumpMessage;
}

/// Posts the termination signal into a pump's queue from another thread.
pub trait PumpStopper: Send {
    fn stop(&self);
}

/// The result of a successful shell-hook registration.
pub struct Registration {
    pub pump: Box<dyn NotificationPump>,
    pub stopper: Box<dyn PumpStopper>,
}

/// Factory for shell-hook listeners.
pub trait ShellHook: Send + Sync {
    /// Creates the listener window and registers it for shell
    /// notifications.
    ///
    /// Called on the thread that will run the pump, because the listener
    /// and its message queue belong to the creating thread.
    fn register(&self) -> Result<Registration, PlatformError>;
}
