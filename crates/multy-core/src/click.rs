use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::ClickConfig;
use crate::{
    DirectoryError, ForegroundForcer, ForegroundGate, MouseButton, Point, PointerInput,
    WindowDirectory, WindowRecord,
};

/// Replays a click at one screen point into every matching window.
///
/// Each window is activated, the cursor is moved to the point and a left
/// button press is posted at the matching client coordinates. Posted
/// button messages reach a window that stayed in the background, so a
/// refused activation is logged and the click is sent anyway. A window
/// whose coordinates cannot be translated is skipped; the others still
/// get the click.
pub struct ClickForwarder {
    directory: WindowDirectory,
    forcer: Arc<ForegroundForcer>,
    gate: Arc<ForegroundGate>,
    input: Arc<dyn PointerInput>,
    keyword: String,
    settle: Duration,
    press: Duration,
}

impl ClickForwarder {
    pub fn new(
        directory: WindowDirectory,
        forcer: Arc<ForegroundForcer>,
        gate: Arc<ForegroundGate>,
        input: Arc<dyn PointerInput>,
        config: &ClickConfig,
    ) -> Self {
        Self {
            directory,
            forcer,
            gate,
            input,
            keyword: config.keyword.clone(),
            settle: Duration::from_millis(config.settle_ms),
            press: Duration::from_millis(config.press_ms),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Forwards a click at `point` (screen coordinates).
    ///
    /// Returns how many windows received the button press. Nothing is
    /// sent while the gate is closed.
    pub fn forward(&self, point: Point) -> Result<usize, DirectoryError> {
        if !self.gate.is_open() {
            tracing::debug!(x = point.x, y = point.y, "click ignored, game window not focused");
            return Ok(0);
        }

        let windows = self.directory.find_all(&self.keyword)?;
        let delivered = windows
            .iter()
            .filter(|window| self.click_window(window, point))
            .count();

        tracing::debug!(
            x = point.x,
            y = point.y,
            matched = windows.len(),
            delivered,
            "click forwarded"
        );
        Ok(delivered)
    }

    fn click_window(&self, window: &WindowRecord, point: Point) -> bool {
        let handle = window.handle;
        if !self.forcer.activate(handle) {
            tracing::warn!(%handle, title = %window.title, "window not activated, clicking anyway");
        }

        let Some(client) = self.input.screen_to_client(handle, point) else {
            tracing::warn!(%handle, "skipping click, point translation failed");
            return false;
        };

        if !self.input.set_cursor_pos(point) {
            tracing::debug!(%handle, "cursor move refused");
        }
        thread::sleep(self.settle);

        if !self.input.post_button(handle, MouseButton::LeftDown, client) {
            tracing::warn!(%handle, "button press not delivered");
            return false;
        }
        thread::sleep(self.press);
        self.input.post_button(handle, MouseButton::LeftUp, client)
    }
}
