//! Pausing input automation while no game window has the focus.

use std::sync::{Arc, Mutex, PoisonError};

use crate::WindowManager;
use crate::config::GateConfig;

/// Opens only while the foreground window's title contains a keyword.
///
/// Click forwarding and hotkeys consult the gate before acting, so they
/// pause as soon as the user switches away from the game and resume once
/// a game window is back in the foreground. A disabled gate is always
/// open.
pub struct ForegroundGate {
    wm: Arc<dyn WindowManager>,
    keyword: Option<String>,
    /// Result of the previous check, for logging transitions.
    last: Mutex<Option<bool>>,
}

impl ForegroundGate {
    pub fn new(wm: Arc<dyn WindowManager>, config: &GateConfig) -> Self {
        Self {
            wm,
            keyword: config.enabled.then(|| config.keyword.clone()),
            last: Mutex::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.keyword.is_some()
    }

    /// Checks the current foreground window.
    pub fn is_open(&self) -> bool {
        let Some(keyword) = &self.keyword else {
            return true;
        };

        let open = self
            .wm
            .foreground_window()
            .is_some_and(|handle| self.wm.window_title(handle).contains(keyword.as_str()));

        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if last.replace(open) != Some(open) {
            if open {
                tracing::info!(keyword = %keyword, "game window focused, input automation resumed");
            } else {
                tracing::info!(keyword = %keyword, "game window lost focus, input automation paused");
            }
        }
        open
    }
}
