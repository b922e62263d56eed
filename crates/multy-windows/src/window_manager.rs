use std::ops::ControlFlow;

use multy_core::{MouseButton, PlatformError, Point, PointerInput, WindowHandle, WindowManager};
use windows::Win32::Foundation::{HWND, LPARAM, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::System::Threading::AttachThreadInput;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, PostMessageW, SW_RESTORE, SetCursorPos,
    SetForegroundWindow, ShowWindow, WM_LBUTTONDOWN, WM_LBUTTONUP,
};
use windows::core::BOOL;

/// `wParam` flag telling the target the left button is held.
const MK_LBUTTON: usize = 0x0001;

/// The live Win32 desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowManager;

pub(crate) fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut _)
}

pub(crate) fn window_handle(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as usize)
}

/// User data handed to `EnumWindows` through its `LPARAM`.
struct EnumState<'a> {
    visit: &'a mut dyn FnMut(WindowHandle) -> ControlFlow<()>,
    stopped: bool,
}

impl WindowManager for Win32WindowManager {
    fn for_each_window(
        &self,
        visit: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>,
    ) -> Result<(), PlatformError> {
        let mut state = EnumState {
            visit,
            stopped: false,
        };

        // SAFETY: EnumWindows runs synchronously, so `state` outlives every
        // callback invocation that dereferences the LPARAM.
        let result = unsafe {
            EnumWindows(
                Some(enum_window_callback),
                LPARAM(&mut state as *mut EnumState<'_> as isize),
            )
        };

        match result {
            Ok(()) => Ok(()),
            // Returning FALSE from the callback surfaces as an error.
            Err(_) if state.stopped => Ok(()),
            Err(e) => Err(PlatformError::new("EnumWindows", e.to_string())),
        }
    }

    fn window_title(&self, handle: WindowHandle) -> String {
        let hwnd = hwnd(handle);
        // SAFETY: both calls only read the window text; a stale handle
        // yields length 0.
        unsafe {
            let length = GetWindowTextLengthW(hwnd);
            if length <= 0 {
                return String::new();
            }
            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    fn is_minimized(&self, handle: WindowHandle) -> bool {
        unsafe { IsIconic(hwnd(handle)) }.as_bool()
    }

    fn restore(&self, handle: WindowHandle) {
        unsafe {
            let _ = ShowWindow(hwnd(handle), SW_RESTORE);
        }
    }

    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| window_handle(hwnd))
    }

    fn set_foreground(&self, handle: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(hwnd(handle)) }.as_bool()
    }

    fn window_thread(&self, handle: WindowHandle) -> u32 {
        unsafe { GetWindowThreadProcessId(hwnd(handle), None) }
    }

    fn attach_thread_input(&self, from: u32, to: u32, attach: bool) -> bool {
        unsafe { AttachThreadInput(from, to, attach) }.as_bool()
    }
}

impl PointerInput for Win32WindowManager {
    fn screen_to_client(&self, handle: WindowHandle, point: Point) -> Option<Point> {
        let mut p = POINT {
            x: point.x,
            y: point.y,
        };
        unsafe { ScreenToClient(hwnd(handle), &mut p) }
            .as_bool()
            .then(|| Point::new(p.x, p.y))
    }

    fn set_cursor_pos(&self, point: Point) -> bool {
        unsafe { SetCursorPos(point.x, point.y) }.is_ok()
    }

    fn post_button(&self, handle: WindowHandle, button: MouseButton, client: Point) -> bool {
        let (msg, keys) = match button {
            MouseButton::LeftDown => (WM_LBUTTONDOWN, MK_LBUTTON),
            MouseButton::LeftUp => (WM_LBUTTONUP, 0),
        };
        // Client coordinates packed as (y << 16) | x, each 16 bits.
        let coords = ((client.y as u16 as isize) << 16) | client.x as u16 as isize;

        // SAFETY: PostMessageW only enqueues; an invalid window fails.
        unsafe { PostMessageW(Some(hwnd(handle)), msg, WPARAM(keys), LPARAM(coords)) }.is_ok()
    }
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration, `FALSE` to stop.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam points at the EnumState owned by for_each_window.
    let state = unsafe { &mut *(lparam.0 as *mut EnumState<'_>) };

    match (state.visit)(window_handle(hwnd)) {
        ControlFlow::Continue(()) => BOOL(1),
        ControlFlow::Break(()) => {
            state.stopped = true;
            BOOL(0)
        }
    }
}
