use std::cell::RefCell;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use multy_core::{ClickControl, ClickError, ClickForwarder, Point};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, HC_ACTION, LLMHF_INJECTED, MSLLHOOKSTRUCT, SetWindowsHookExW,
    UnhookWindowsHookEx, WH_MOUSE_LL, WM_MBUTTONDOWN,
};

use crate::message_loop::{current_thread_id, post_quit, run_message_pump};

// Thread-local sender for the low-level mouse hook callback.
thread_local! {
    static CLICK_SENDER: RefCell<Option<Sender<Point>>> = const { RefCell::new(None) };
}

/// Forwards physical middle-clicks to every matching window.
///
/// A hook thread captures middle-button presses and hands their screen
/// position to a worker thread, which runs the [`ClickForwarder`]. The
/// hook callback never blocks on forwarding.
pub struct ClickService {
    forwarder: Arc<ClickForwarder>,
    running: Option<Running>,
}

struct Running {
    hook_thread_id: u32,
    hook: JoinHandle<()>,
    worker: JoinHandle<()>,
}

impl ClickService {
    pub fn new(forwarder: Arc<ClickForwarder>) -> Self {
        Self {
            forwarder,
            running: None,
        }
    }
}

impl ClickControl for ClickService {
    fn start(&mut self) -> Result<(), ClickError> {
        if self.running.is_some() {
            return Err(ClickError::AlreadyRunning);
        }

        let (click_tx, click_rx) = mpsc::channel::<Point>();
        let forwarder = self.forwarder.clone();
        let worker = thread::Builder::new()
            .name("multy-click-worker".into())
            .spawn(move || forward_clicks(&forwarder, click_rx))
            .map_err(|e| ClickError::Hook {
                message: format!("failed to spawn click worker: {e}"),
            })?;

        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();
        let spawned = thread::Builder::new()
            .name("multy-mouse-hook".into())
            .spawn(move || run_hook(click_tx, ready_tx));

        // The worker ends once the hook thread drops its sender.
        let hook = match spawned {
            Ok(hook) => hook,
            Err(e) => {
                let _ = worker.join();
                return Err(ClickError::Hook {
                    message: format!("failed to spawn mouse hook thread: {e}"),
                });
            }
        };

        let hook_thread_id = match ready_rx.recv() {
            Ok(Ok(thread_id)) => thread_id,
            Ok(Err(message)) => {
                let _ = hook.join();
                let _ = worker.join();
                return Err(ClickError::Hook { message });
            }
            Err(_) => {
                let _ = hook.join();
                let _ = worker.join();
                return Err(ClickError::Hook {
                    message: "mouse hook thread exited unexpectedly".into(),
                });
            }
        };

        tracing::info!(keyword = self.forwarder.keyword(), "click forwarding started");
        self.running = Some(Running {
            hook_thread_id,
            hook,
            worker,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ClickError> {
        let running = self.running.take().ok_or(ClickError::NotRunning)?;

        post_quit(running.hook_thread_id);
        if running.hook.join().is_err() {
            tracing::error!("mouse hook thread panicked");
        }
        if running.worker.join().is_err() {
            tracing::error!("click worker thread panicked");
        }

        tracing::info!("click forwarding stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

impl Drop for ClickService {
    fn drop(&mut self) {
        if self.running.is_some() {
            let _ = self.stop();
        }
    }
}

fn forward_clicks(forwarder: &ClickForwarder, clicks: Receiver<Point>) {
    for point in clicks {
        if let Err(e) = forwarder.forward(point) {
            tracing::warn!(x = point.x, y = point.y, "click not forwarded: {e}");
        }
    }
}

/// Body of the hook thread: installs the hook, pumps messages until
/// `WM_QUIT`, then uninstalls it.
fn run_hook(click_tx: Sender<Point>, ready_tx: Sender<Result<u32, String>>) {
    CLICK_SENDER.with(|cell| *cell.borrow_mut() = Some(click_tx));

    // SAFETY: a low-level hook runs its callback on this thread, which
    // pumps messages below for as long as the hook is installed.
    let hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), None, 0) } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("SetWindowsHookExW failed: {}", e.message())));
            CLICK_SENDER.with(|cell| *cell.borrow_mut() = None);
            return;
        }
    };

    let _ = ready_tx.send(Ok(current_thread_id()));
    run_message_pump(|_| false);

    unsafe {
        let _ = UnhookWindowsHookEx(hook);
    }
    CLICK_SENDER.with(|cell| *cell.borrow_mut() = None);
}

/// The low-level mouse callback.
///
/// Physical middle-button presses are queued for forwarding; every event
/// is passed on unchanged.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 && wparam.0 as u32 == WM_MBUTTONDOWN {
        // SAFETY: for WH_MOUSE_LL with HC_ACTION, lparam points at a
        // MSLLHOOKSTRUCT valid for the duration of the call.
        let info = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
        if info.flags & LLMHF_INJECTED == 0 {
            let point = Point::new(info.pt.x, info.pt.y);
            CLICK_SENDER.with(|cell| {
                if let Some(sender) = cell.borrow().as_ref() {
                    let _ = sender.send(point);
                }
            });
        }
    }

    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
