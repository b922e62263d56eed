use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use multy_core::config::hotkey::register_with;
use multy_core::config::{HotkeyBinding, Modifier};
use multy_core::focus::focus_for_hotkey;
use multy_core::{
    ForegroundForcer, ForegroundGate, HotkeyControl, HotkeyError, WindowDirectory, keys,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT, MOD_WIN, RegisterHotKey,
    UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::WM_HOTKEY;

use crate::message_loop::{current_thread_id, post_quit, run_message_pump};

/// Global hotkeys that bring a window to the foreground.
///
/// Hotkeys belong to the thread that registers them, so the whole set
/// lives on one dedicated thread. Changing the set restarts that thread
/// with the new bindings.
pub struct HotkeyService {
    directory: WindowDirectory,
    forcer: Arc<ForegroundForcer>,
    gate: Arc<ForegroundGate>,
    bindings: Vec<HotkeyBinding>,
    thread: Option<HotkeyThread>,
}

struct HotkeyThread {
    thread_id: u32,
    handle: JoinHandle<()>,
}

impl HotkeyThread {
    fn stop(self) {
        post_quit(self.thread_id);
        if self.handle.join().is_err() {
            tracing::error!("hotkey thread panicked");
        }
    }
}

/// What the hotkey thread reports once registration is done.
struct Started {
    thread_id: u32,
    /// Indices of bindings the OS refused (combination already taken).
    refused: Vec<usize>,
}

impl HotkeyService {
    pub fn new(
        directory: WindowDirectory,
        forcer: Arc<ForegroundForcer>,
        gate: Arc<ForegroundGate>,
    ) -> Self {
        Self {
            directory,
            forcer,
            gate,
            bindings: Vec::new(),
            thread: None,
        }
    }

    /// Replaces the running thread with one holding `bindings`.
    ///
    /// The old thread is gone even when this fails.
    fn restart(&mut self, bindings: &[HotkeyBinding]) -> Result<Vec<usize>, HotkeyError> {
        if let Some(thread) = self.thread.take() {
            thread.stop();
        }
        if bindings.is_empty() {
            return Ok(Vec::new());
        }

        let (ready_tx, ready_rx) = mpsc::channel::<Started>();
        let directory = self.directory.clone();
        let forcer = self.forcer.clone();
        let gate = self.gate.clone();
        let owned = bindings.to_vec();

        let handle = thread::Builder::new()
            .name("multy-hotkeys".into())
            .spawn(move || run_hotkeys(&owned, &directory, &forcer, &gate, ready_tx))
            .map_err(|e| HotkeyError::Registration {
                message: format!("failed to spawn hotkey thread: {e}"),
            })?;

        let Ok(started) = ready_rx.recv() else {
            let _ = handle.join();
            return Err(HotkeyError::Registration {
                message: "hotkey thread exited unexpectedly".into(),
            });
        };

        self.thread = Some(HotkeyThread {
            thread_id: started.thread_id,
            handle,
        });
        Ok(started.refused)
    }
}

impl HotkeyControl for HotkeyService {
    fn register(&mut self, binding: HotkeyBinding) -> Result<Option<HotkeyBinding>, HotkeyError> {
        let current = std::mem::take(&mut self.bindings);
        let (live, result) = register_with(&current, binding.clone(), |set| self.restart(set));
        self.bindings = live;

        if result.is_ok() {
            tracing::info!(combo = %binding.combo(), window = %binding.window, "hotkey registered");
        }
        result
    }

    fn unregister_all(&mut self) -> usize {
        if let Some(thread) = self.thread.take() {
            thread.stop();
        }
        let removed = self.bindings.len();
        self.bindings.clear();
        if removed > 0 {
            tracing::info!(removed, "hotkeys unregistered");
        }
        removed
    }

    fn bindings(&self) -> Vec<HotkeyBinding> {
        self.bindings.clone()
    }
}

impl Drop for HotkeyService {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            thread.stop();
        }
    }
}

/// Body of the hotkey thread. Hotkey ids are binding indices plus one.
fn run_hotkeys(
    bindings: &[HotkeyBinding],
    directory: &WindowDirectory,
    forcer: &ForegroundForcer,
    gate: &ForegroundGate,
    ready_tx: mpsc::Sender<Started>,
) {
    let mut registered = Vec::new();
    let mut refused = Vec::new();

    for (i, binding) in bindings.iter().enumerate() {
        let id = (i + 1) as i32;
        let Some(vk) = keys::vk_from_name(&binding.key) else {
            refused.push(i);
            continue;
        };

        let mut modifiers = MOD_NOREPEAT;
        for m in &binding.modifiers {
            modifiers |= modifier_to_flag(*m);
        }

        // SAFETY: registers on this thread's queue, pumped below.
        if unsafe { RegisterHotKey(None, id, modifiers, vk) }.is_ok() {
            registered.push(id);
        } else {
            refused.push(i);
        }
    }

    let _ = ready_tx.send(Started {
        thread_id: current_thread_id(),
        refused,
    });

    run_message_pump(|msg| {
        if msg.message != WM_HOTKEY {
            return false;
        }
        let id = msg.wParam.0;
        if let Some(binding) = id.checked_sub(1).and_then(|i| bindings.get(i)) {
            tracing::debug!(combo = %binding.combo(), "hotkey pressed");
            if let Some(Err(e)) = focus_for_hotkey(gate, directory, forcer, binding) {
                tracing::warn!(combo = %binding.combo(), "hotkey focus failed: {e}");
            }
        }
        true
    });

    for id in registered {
        unsafe {
            let _ = UnregisterHotKey(None, id);
        }
    }
}

/// Converts a platform-agnostic modifier to a Win32 hotkey flag.
fn modifier_to_flag(modifier: Modifier) -> HOT_KEY_MODIFIERS {
    match modifier {
        Modifier::Alt => MOD_ALT,
        Modifier::Shift => MOD_SHIFT,
        Modifier::Ctrl => MOD_CONTROL,
        Modifier::Win => MOD_WIN,
    }
}
