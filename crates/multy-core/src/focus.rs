use crate::config::HotkeyBinding;
use crate::{FocusError, ForegroundForcer, ForegroundGate, WindowDirectory, WindowRecord};

/// Resolves `keyword` to a window and brings it to the foreground.
///
/// Returns the window that was focused.
pub fn focus_window(
    directory: &WindowDirectory,
    forcer: &ForegroundForcer,
    keyword: &str,
) -> Result<WindowRecord, FocusError> {
    let record = directory.find_by_keyword(keyword)?;

    if !forcer.activate(record.handle) {
        return Err(FocusError::ActivationFailed {
            handle: record.handle,
            title: record.title,
        });
    }

    tracing::info!(handle = %record.handle, title = %record.title, "focused window");
    Ok(record)
}

/// Reacts to a pressed hotkey by focusing its window.
///
/// Returns `None` when the gate is closed and the press was ignored.
pub fn focus_for_hotkey(
    gate: &ForegroundGate,
    directory: &WindowDirectory,
    forcer: &ForegroundForcer,
    binding: &HotkeyBinding,
) -> Option<Result<WindowRecord, FocusError>> {
    if !gate.is_open() {
        tracing::debug!(combo = %binding.combo(), "hotkey ignored, game window not focused");
        return None;
    }
    Some(focus_window(directory, forcer, &binding.window))
}
