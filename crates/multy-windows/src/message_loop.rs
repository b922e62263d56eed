use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage, WM_QUIT,
};

pub(crate) fn current_thread_id() -> u32 {
    // SAFETY: GetCurrentThreadId has no preconditions.
    unsafe { GetCurrentThreadId() }
}

/// Runs the thread's message pump until `WM_QUIT`.
///
/// `intercept` sees every message first; returning `true` marks it
/// handled and skips translation and dispatch.
pub(crate) fn run_message_pump(mut intercept: impl FnMut(&MSG) -> bool) {
    let mut msg = MSG::default();

    // GetMessageW returns 0 for WM_QUIT and -1 on failure.
    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 > 0 {
        if intercept(&msg) {
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Posts `WM_QUIT` to another thread's message queue.
pub(crate) fn post_quit(thread_id: u32) -> bool {
    // SAFETY: PostThreadMessageW only enqueues a message; an unknown
    // thread id makes it fail without side effects.
    let posted = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) };
    if let Err(e) = &posted {
        tracing::warn!(thread_id, "failed to post WM_QUIT: {e}");
    }
    posted.is_ok()
}
