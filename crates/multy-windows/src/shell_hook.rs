use std::cell::RefCell;
use std::collections::VecDeque;

use multy_core::{
    NotificationEvent, NotificationPump, PlatformError, PumpMessage, PumpStopper, Registration,
    ShellHook,
};
use windows::Win32::Foundation::{
    ERROR_CLASS_ALREADY_EXISTS, GetLastError, HWND, LPARAM, LRESULT, WPARAM,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DeregisterShellHookWindow, DestroyWindow, DispatchMessageW,
    GetMessageW, HWND_MESSAGE, InSendMessage, MSG, PostMessageW, PostQuitMessage, RegisterClassW,
    RegisterShellHookWindow, RegisterWindowMessageW, TranslateMessage, WM_DESTROY, WM_NULL,
    WNDCLASSW,
};
use windows::core::w;

use crate::message_loop::{current_thread_id, post_quit};
use crate::window_manager::window_handle;

/// Per-thread state shared between the listener's window procedure and
/// its pump.
struct ShellState {
    /// Id of the registered "SHELLHOOK" window message.
    message_id: u32,
    /// Notifications received by the window procedure, not yet returned
    /// by `next_message`.
    pending: VecDeque<NotificationEvent>,
}

thread_local! {
    static SHELL_STATE: RefCell<Option<ShellState>> = const { RefCell::new(None) };
}

/// Creates shell-hook listener windows on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32ShellHook;

impl ShellHook for Win32ShellHook {
    fn register(&self) -> Result<Registration, PlatformError> {
        let message_id = unsafe { RegisterWindowMessageW(w!("SHELLHOOK")) };
        if message_id == 0 {
            return Err(last_error("RegisterWindowMessageW"));
        }

        SHELL_STATE.with(|cell| {
            *cell.borrow_mut() = Some(ShellState {
                message_id,
                pending: VecDeque::new(),
            });
        });

        let hwnd = match create_listener_window() {
            Ok(hwnd) => hwnd,
            Err(e) => {
                clear_state();
                return Err(e);
            }
        };

        // SAFETY: hwnd was created on this thread and is still alive.
        if !unsafe { RegisterShellHookWindow(hwnd) }.as_bool() {
            let error = last_error("RegisterShellHookWindow");
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            clear_state();
            return Err(error);
        }

        tracing::debug!(message_id, "shell hook window registered");

        Ok(Registration {
            pump: Box::new(Win32NotificationPump { hwnd }),
            stopper: Box::new(ThreadQuitStopper {
                thread_id: current_thread_id(),
            }),
        })
    }
}

/// The registered listener window. Unregisters and destroys it on drop.
struct Win32NotificationPump {
    hwnd: HWND,
}

impl NotificationPump for Win32NotificationPump {
    fn next_message(&mut self) -> PumpMessage {
        loop {
            if let Some(event) = pop_pending() {
                return PumpMessage::Notification(event);
            }

            let mut msg = MSG::default();
            match unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 {
                0 => return PumpMessage::Quit,
                -1 => return PumpMessage::Error(last_error("GetMessageW").message),
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }
    }
}

impl Drop for Win32NotificationPump {
    fn drop(&mut self) {
        unsafe {
            let _ = DeregisterShellHookWindow(self.hwnd);
            let _ = DestroyWindow(self.hwnd);
        }
        clear_state();
    }
}

/// Ends a pump by posting `WM_QUIT` to the thread that owns it.
struct ThreadQuitStopper {
    thread_id: u32,
}

impl PumpStopper for ThreadQuitStopper {
    fn stop(&self) {
        post_quit(self.thread_id);
    }
}

fn pop_pending() -> Option<NotificationEvent> {
    SHELL_STATE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .and_then(|state| state.pending.pop_front())
    })
}

fn clear_state() {
    SHELL_STATE.with(|cell| *cell.borrow_mut() = None);
}

fn last_error(operation: &'static str) -> PlatformError {
    PlatformError::new(operation, windows::core::Error::from_win32().message())
}

/// Creates the message-only window that receives shell notifications.
fn create_listener_window() -> Result<HWND, PlatformError> {
    let class_name = w!("MultyShellHook");
    let wc = WNDCLASSW {
        lpfnWndProc: Some(shell_hook_proc),
        lpszClassName: class_name,
        ..Default::default()
    };

    // SAFETY: the class data is static; re-registration from a later
    // session is tolerated.
    if unsafe { RegisterClassW(&wc) } == 0 && unsafe { GetLastError() } != ERROR_CLASS_ALREADY_EXISTS
    {
        return Err(last_error("RegisterClassW"));
    }

    let hwnd = unsafe {
        CreateWindowExW(
            Default::default(),
            class_name,
            w!("MultyShellHook"),
            Default::default(),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            None,
            None,
        )
    };

    match hwnd {
        Ok(h) if !h.is_invalid() => Ok(h),
        Ok(_) => Err(PlatformError::new("CreateWindowExW", "returned a null window")),
        Err(e) => Err(PlatformError::new("CreateWindowExW", e.message())),
    }
}

/// WNDPROC for the listener window.
///
/// Queues shell notifications for the pump. A notification delivered
/// with `SendMessage` does not wake `GetMessageW`, so a `WM_NULL` is
/// posted to make the pump return and drain the queue.
unsafe extern "system" fn shell_hook_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let queued = SHELL_STATE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(state) if msg == state.message_id => {
            let source = window_handle(HWND(lparam.0 as *mut _));
            state
                .pending
                .push_back(NotificationEvent::new(wparam.0 as u32, source));
            true
        }
        _ => false,
    });

    if queued {
        if unsafe { InSendMessage() }.as_bool() {
            unsafe {
                let _ = PostMessageW(Some(hwnd), WM_NULL, WPARAM(0), LPARAM(0));
            }
        }
        return LRESULT(0);
    }

    if msg == WM_DESTROY {
        unsafe { PostQuitMessage(0) };
        return LRESULT(0);
    }

    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}
