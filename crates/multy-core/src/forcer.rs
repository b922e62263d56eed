use std::sync::Arc;

use crate::{WindowHandle, WindowManager};

/// Brings a window to the foreground despite the OS foreground lock.
///
/// A direct switch is attempted first. When the OS refuses it, the input
/// queue of the thread owning the current foreground window is attached
/// to the target's thread and the switch is retried once. The queues are
/// always detached again before returning.
pub struct ForegroundForcer {
    wm: Arc<dyn WindowManager>,
}

impl ForegroundForcer {
    pub fn new(wm: Arc<dyn WindowManager>) -> Self {
        Self { wm }
    }

    /// Activates `handle`, returning whether it ended up in the
    /// foreground. A refusal is logged, never fatal.
    pub fn activate(&self, handle: WindowHandle) -> bool {
        if self.wm.is_minimized(handle) {
            tracing::debug!(%handle, "restoring minimized window");
            self.wm.restore(handle);
        }

        if self.wm.set_foreground(handle) {
            return true;
        }

        let Some(foreground) = self.wm.foreground_window() else {
            tracing::warn!(%handle, "foreground refused and no current foreground window");
            return false;
        };
        let foreground_thread = self.wm.window_thread(foreground);
        let target_thread = self.wm.window_thread(handle);
        if foreground_thread == 0 || target_thread == 0 {
            tracing::warn!(%handle, "foreground refused and window thread is unknown");
            return false;
        }

        if foreground_thread == target_thread {
            return self.retry(handle);
        }

        let Some(_attachment) =
            InputAttachment::new(self.wm.as_ref(), foreground_thread, target_thread)
        else {
            tracing::warn!(
                %handle,
                foreground_thread,
                target_thread,
                "could not attach thread input"
            );
            return false;
        };
        self.retry(handle)
    }

    fn retry(&self, handle: WindowHandle) -> bool {
        let switched = self.wm.set_foreground(handle);
        if !switched {
            tracing::warn!(%handle, "foreground switch refused after retry");
        }
        switched
    }
}

/// Attached input queues of two threads, detached on drop.
struct InputAttachment<'a> {
    wm: &'a dyn WindowManager,
    from: u32,
    to: u32,
}

impl<'a> InputAttachment<'a> {
    fn new(wm: &'a dyn WindowManager, from: u32, to: u32) -> Option<Self> {
        wm.attach_thread_input(from, to, true)
            .then(|| Self { wm, from, to })
    }
}

impl Drop for InputAttachment<'_> {
    fn drop(&mut self) {
        self.wm.attach_thread_input(self.from, self.to, false);
    }
}
