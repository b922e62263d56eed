//! Dispatch of IPC commands onto the daemon's components.

use std::sync::Arc;

use crate::config::HotkeyBinding;
use crate::focus::focus_window;
use crate::{
    ClickError, Command, ForegroundForcer, HotkeyError, Monitor, MonitorStatus, Response,
    ShellHook, WindowDirectory, WindowManager,
};

/// Start/stop control of middle-click forwarding.
pub trait ClickControl {
    fn start(&mut self) -> Result<(), ClickError>;
    fn stop(&mut self) -> Result<(), ClickError>;
    fn is_running(&self) -> bool;
}

/// Global hotkey registrations.
pub trait HotkeyControl {
    /// Registers `binding`, replacing any binding with the same key
    /// combination. Returns the replaced binding.
    fn register(&mut self, binding: HotkeyBinding) -> Result<Option<HotkeyBinding>, HotkeyError>;

    /// Removes every binding and returns how many there were.
    fn unregister_all(&mut self) -> usize;

    fn bindings(&self) -> Vec<HotkeyBinding>;
}

/// Everything the daemon can do, behind one command entry point.
pub struct Services {
    monitor: Monitor,
    directory: WindowDirectory,
    forcer: Arc<ForegroundForcer>,
    click: Box<dyn ClickControl>,
    hotkeys: Box<dyn HotkeyControl>,
}

impl Services {
    pub fn new(
        wm: Arc<dyn WindowManager>,
        hook: Arc<dyn ShellHook>,
        click: Box<dyn ClickControl>,
        hotkeys: Box<dyn HotkeyControl>,
    ) -> Self {
        Self {
            monitor: Monitor::new(wm.clone(), hook),
            directory: WindowDirectory::new(wm.clone()),
            forcer: Arc::new(ForegroundForcer::new(wm)),
            click,
            hotkeys,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Executes one command and describes the outcome.
    ///
    /// `Stop` only acknowledges; the caller ends its loop and calls
    /// [`Services::shutdown`].
    pub fn handle(&mut self, command: &Command) -> Response {
        match command {
            Command::Stop => Response::ok_with_message("daemon stopping"),
            Command::Status => self.status(),
            Command::StartMonitoring { keyword } => match self.monitor.start(keyword) {
                Ok(target) => Response::ok_with_message(format!(
                    "monitoring '{}' ({})",
                    target.title, target.handle
                )),
                Err(e) => Response::error(&e),
            },
            Command::StopMonitoring => match self.monitor.stop() {
                Ok(()) => Response::ok_with_message("monitoring stopped"),
                Err(e) => Response::error(&e),
            },
            Command::ListWindows => match self.directory.list_windows() {
                Ok(windows) => Response::ok().with_windows(windows),
                Err(e) => Response::error(&e),
            },
            Command::Focus { keyword } => {
                match focus_window(&self.directory, &self.forcer, keyword) {
                    Ok(record) => Response::ok_with_message(format!("focused '{}'", record.title)),
                    Err(e) => Response::error(&e),
                }
            }
            Command::StartClickForwarding => match self.click.start() {
                Ok(()) => Response::ok_with_message("click forwarding started"),
                Err(e) => Response::error(&e),
            },
            Command::StopClickForwarding => match self.click.stop() {
                Ok(()) => Response::ok_with_message("click forwarding stopped"),
                Err(e) => Response::error(&e),
            },
            Command::RegisterHotkey { binding } => self.register_hotkey(binding.clone()),
            Command::UnregisterHotkeys => {
                let removed = self.hotkeys.unregister_all();
                Response::ok_with_message(format!("unregistered {removed} hotkey(s)"))
            }
        }
    }

    /// Registers hotkeys read from the config file, logging failures.
    pub fn register_configured_hotkeys(&mut self, bindings: &[HotkeyBinding]) {
        for binding in bindings {
            if let Err(e) = self.hotkeys.register(binding.clone()) {
                tracing::warn!(combo = %binding.combo(), "hotkey not registered: {e}");
            }
        }
    }

    /// Stops every running component.
    pub fn shutdown(&mut self) {
        if self.monitor.is_running() {
            let _ = self.monitor.stop();
        }
        if self.click.is_running() {
            let _ = self.click.stop();
        }
        self.hotkeys.unregister_all();
    }

    fn status(&self) -> Response {
        let monitor = self.monitor.status();
        let monitor_line = match &monitor {
            MonitorStatus::Idle => "monitor: idle".to_string(),
            MonitorStatus::Running(target) => {
                format!("monitor: running '{}' ({})", target.title, target.handle)
            }
        };
        let click_line = if self.click.is_running() {
            "click forwarding: on"
        } else {
            "click forwarding: off"
        };
        let hotkey_line = format!("hotkeys: {}", self.hotkeys.bindings().len());

        Response::ok_with_message(format!(
            "daemon running\n{monitor_line}\n{click_line}\n{hotkey_line}"
        ))
        .with_monitor(monitor)
    }

    fn register_hotkey(&mut self, binding: HotkeyBinding) -> Response {
        if let Err(e) = binding.validate() {
            return Response::error(&e);
        }
        let combo = binding.combo();
        let window = binding.window.clone();
        match self.hotkeys.register(binding) {
            Ok(Some(previous)) => Response::ok_with_message(format!(
                "registered {combo} for '{window}' (replaced '{}')",
                previous.window
            )),
            Ok(None) => Response::ok_with_message(format!("registered {combo} for '{window}'")),
            Err(e) => Response::error(&e),
        }
    }
}

impl Drop for Services {
    fn drop(&mut self) {
        self.shutdown();
    }
}
