//! In-memory stand-ins for the OS capabilities, used by unit tests.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    MouseButton, NotificationEvent, NotificationPump, PlatformError, Point, PointerInput,
    PumpMessage, PumpStopper, Registration, ShellHook, WindowHandle, WindowManager,
};

/// An OS call observed by a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Restore(WindowHandle),
    SetForeground(WindowHandle),
    Attach(u32, u32),
    Detach(u32, u32),
    Cursor(Point),
    Button(WindowHandle, MouseButton, Point),
}

#[derive(Debug, Clone)]
struct FakeWindow {
    handle: WindowHandle,
    title: String,
    thread: u32,
    minimized: bool,
}

#[derive(Debug, Default)]
struct State {
    windows: Vec<FakeWindow>,
    foreground: Option<WindowHandle>,
    fail_enumeration: bool,
    refuse_direct: bool,
    refuse_attached: bool,
    refuse_attach: bool,
    attached: Vec<(u32, u32)>,
    visited: usize,
    calls: Vec<Call>,
}

/// A window manager backed by a plain list of windows.
///
/// Each window gets handle `0x100 * (index + 1)` and its own thread id
/// `index + 1`. The foreground window belongs to thread 999 unless a
/// test moves the foreground to one of the fake windows.
#[derive(Debug, Default)]
pub(crate) struct FakeWindowManager {
    state: Mutex<State>,
}

pub(crate) const FOREGROUND_THREAD: u32 = 999;
const FOREGROUND_HANDLE: WindowHandle = WindowHandle::from_raw(0xF0F0);

impl FakeWindowManager {
    pub(crate) fn with_titles(titles: &[&str]) -> Arc<Self> {
        let windows = titles
            .iter()
            .enumerate()
            .map(|(i, title)| FakeWindow {
                handle: WindowHandle::from_raw(0x100 * (i + 1)),
                title: (*title).to_owned(),
                thread: (i + 1) as u32,
                minimized: false,
            })
            .collect();
        Arc::new(Self {
            state: Mutex::new(State {
                windows,
                foreground: Some(FOREGROUND_HANDLE),
                ..State::default()
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub(crate) fn handle_of(&self, title: &str) -> WindowHandle {
        self.state()
            .windows
            .iter()
            .find(|w| w.title == title)
            .map(|w| w.handle)
            .unwrap()
    }

    pub(crate) fn thread_of(&self, handle: WindowHandle) -> u32 {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .map(|w| w.thread)
            .unwrap()
    }

    pub(crate) fn fail_enumeration(&self) {
        self.state().fail_enumeration = true;
    }

    /// Makes every unattached `set_foreground` call fail.
    pub(crate) fn refuse_direct_switch(&self) {
        self.state().refuse_direct = true;
    }

    /// Makes `set_foreground` fail even while input is attached.
    pub(crate) fn refuse_attached_switch(&self) {
        self.state().refuse_attached = true;
    }

    pub(crate) fn refuse_attach(&self) {
        self.state().refuse_attach = true;
    }

    pub(crate) fn minimize(&self, handle: WindowHandle) {
        if let Some(w) = self.state().windows.iter_mut().find(|w| w.handle == handle) {
            w.minimized = true;
        }
    }

    pub(crate) fn set_foreground_to(&self, handle: WindowHandle) {
        self.state().foreground = Some(handle);
    }

    pub(crate) fn remove(&self, handle: WindowHandle) {
        self.state().windows.retain(|w| w.handle != handle);
    }

    pub(crate) fn is_minimized_now(&self, handle: WindowHandle) -> bool {
        self.is_minimized(handle)
    }

    /// Number of windows handed to enumeration visitors so far.
    pub(crate) fn visited(&self) -> usize {
        self.state().visited
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub(crate) fn foreground_switches(&self, handle: WindowHandle) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| **c == Call::SetForeground(handle))
            .count()
    }

    fn thread_for(state: &State, handle: WindowHandle) -> u32 {
        if handle == FOREGROUND_HANDLE {
            return FOREGROUND_THREAD;
        }
        state
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .map_or(0, |w| w.thread)
    }
}

impl WindowManager for FakeWindowManager {
    fn for_each_window(
        &self,
        visit: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>,
    ) -> Result<(), PlatformError> {
        let handles: Vec<WindowHandle> = {
            let state = self.state();
            if state.fail_enumeration {
                return Err(PlatformError::new("EnumWindows", "simulated failure"));
            }
            state.windows.iter().map(|w| w.handle).collect()
        };

        for handle in handles {
            self.state().visited += 1;
            if visit(handle).is_break() {
                break;
            }
        }
        Ok(())
    }

    fn window_title(&self, handle: WindowHandle) -> String {
        self.state()
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .map(|w| w.title.clone())
            .unwrap_or_default()
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        self.state()
            .windows
            .iter()
            .any(|w| w.handle == handle && w.minimized)
    }

    fn restore(&self, handle: WindowHandle) {
        let mut state = self.state();
        state.calls.push(Call::Restore(handle));
        if let Some(w) = state.windows.iter_mut().find(|w| w.handle == handle) {
            w.minimized = false;
        }
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        self.state().foreground
    }

    fn set_foreground(&self, handle: WindowHandle) -> bool {
        let mut state = self.state();
        state.calls.push(Call::SetForeground(handle));

        let fg_thread = state.foreground.map_or(0, |fg| Self::thread_for(&state, fg));
        let target_thread = Self::thread_for(&state, handle);
        let attached = state.attached.contains(&(fg_thread, target_thread));

        let allowed = if attached {
            !state.refuse_attached
        } else {
            !state.refuse_direct
        };
        if allowed {
            state.foreground = Some(handle);
        }
        allowed
    }

    fn window_thread(&self, handle: WindowHandle) -> u32 {
        Self::thread_for(&self.state(), handle)
    }

    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool {
        let mut state = self.state();
        if attach {
            state.calls.push(Call::Attach(from, to));
            if state.refuse_attach {
                return false;
            }
            state.attached.push((from, to));
        } else {
            state.calls.push(Call::Detach(from, to));
            state.attached.retain(|pair| *pair != (from, to));
        }
        true
    }
}

impl PointerInput for FakeWindowManager {
    fn screen_to_client(&self, handle: WindowHandle, point: Point) -> Option<Point> {
        // Every fake window's client area starts at (10, 20) on screen.
        self.state()
            .windows
            .iter()
            .any(|w| w.handle == handle)
            .then(|| Point::new(point.x - 10, point.y - 20))
    }

    fn set_cursor_pos(&self, point: Point) -> bool {
        self.state().calls.push(Call::Cursor(point));
        true
    }

    fn post_button(&self, handle: WindowHandle, button: MouseButton, client: Point) -> bool {
        self.state().calls.push(Call::Button(handle, button, client));
        true
    }
}

/// A shell hook whose notifications are injected by the test.
///
/// Notifications and the quit signal travel through the same channel,
/// so a quit posted after a notification is observed after it, like on
/// a real message queue.
#[derive(Debug, Default)]
pub(crate) struct FakeShellHook {
    fail: AtomicBool,
    registrations: AtomicUsize,
    injector: Mutex<Option<Sender<PumpMessage>>>,
}

impl FakeShellHook {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn fail_registration(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn registrations(&self) -> usize {
        self.registrations.load(Ordering::SeqCst)
    }

    /// Sends a message to the most recently registered pump.
    pub(crate) fn inject(&self, message: PumpMessage) {
        if let Some(tx) = self.injector.lock().unwrap().as_ref() {
            let _ = tx.send(message);
        }
    }

    pub(crate) fn notify(&self, raw_code: u32, handle: WindowHandle) {
        self.inject(PumpMessage::Notification(NotificationEvent::new(
            raw_code, handle,
        )));
    }
}

impl ShellHook for FakeShellHook {
    fn register(&self) -> Result<Registration, PlatformError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PlatformError::new(
                "RegisterShellHookWindow",
                "simulated failure",
            ));
        }
        self.registrations.fetch_add(1, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel();
        *self.injector.lock().unwrap() = Some(tx.clone());
        Ok(Registration {
            pump: Box::new(ChannelPump { rx }),
            stopper: Box::new(ChannelStopper { tx }),
        })
    }
}

struct ChannelPump {
    rx: Receiver<PumpMessage>,
}

impl NotificationPump for ChannelPump {
    fn next_message(&mut self) -> PumpMessage {
        self.rx.recv().unwrap_or(PumpMessage::Quit)
    }
}

struct ChannelStopper {
    tx: Sender<PumpMessage>,
}

impl PumpStopper for ChannelStopper {
    fn stop(&self) {
        let _ = self.tx.send(PumpMessage::Quit);
    }
}
