//! Foreground monitoring of one tracked window.
//!
//! A monitoring session resolves a window by title keyword, registers a
//! shell-hook listener on a dedicated thread and forces the tracked
//! window to the foreground every time it flashes for attention.

mod pump;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

use crate::{
    ForegroundForcer, MonitorError, PumpStopper, ShellHook, WindowDirectory, WindowHandle,
    WindowManager,
};

/// The window a running session reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTarget {
    /// The keyword the session was started with.
    pub keyword: String,
    pub handle: WindowHandle,
    /// Title of the window at resolution time.
    pub title: String,
}

/// Observable state of the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum MonitorStatus {
    Idle,
    Running(TrackedTarget),
}

/// Start/stop state machine for monitoring sessions.
///
/// At most one session runs at a time. The state lock is held for
/// transitions only, never while the pump is running.
pub struct Monitor {
    directory: WindowDirectory,
    forcer: Arc<ForegroundForcer>,
    hook: Arc<dyn ShellHook>,
    session: Mutex<Session>,
}

#[derive(Default)]
struct Session {
    active: Option<ActiveSession>,
    /// Pump thread of the last stopped session, joined by the next start.
    exiting: Option<JoinHandle<()>>,
}

struct ActiveSession {
    target: TrackedTarget,
    stopper: Box<dyn PumpStopper>,
    thread: JoinHandle<()>,
}

impl Monitor {
    pub fn new(wm: Arc<dyn WindowManager>, hook: Arc<dyn ShellHook>) -> Self {
        Self {
            directory: WindowDirectory::new(wm.clone()),
            forcer: Arc::new(ForegroundForcer::new(wm)),
            hook,
            session: Mutex::new(Session::default()),
        }
    }

    /// Starts monitoring the first window whose title contains `keyword`.
    ///
    /// The session is `Running` only once the shell hook is registered;
    /// on any failure the monitor stays idle. A running session is never
    /// replaced: stop it first.
    pub fn start(&self, keyword: &str) -> Result<TrackedTarget, MonitorError> {
        let mut session = self.lock();
        if let Some(active) = &session.active {
            return Err(MonitorError::AlreadyRunning {
                keyword: active.target.keyword.clone(),
            });
        }

        let record = self
            .directory
            .find_by_keyword(keyword)
            .map_err(|source| MonitorError::Resolution {
                keyword: keyword.to_owned(),
                source,
            })?;

        if let Some(previous) = session.exiting.take() {
            join_pump(previous);
        }

        let (stopper, thread) =
            pump::spawn(self.hook.clone(), self.forcer.clone(), record.handle)?;
        let target = TrackedTarget {
            keyword: keyword.to_owned(),
            handle: record.handle,
            title: record.title,
        };
        tracing::info!(
            keyword,
            handle = %target.handle,
            title = %target.title,
            "monitoring started"
        );

        session.active = Some(ActiveSession {
            target: target.clone(),
            stopper,
            thread,
        });
        Ok(target)
    }

    /// Signals the running session to stop and returns without waiting
    /// for its pump thread to exit.
    pub fn stop(&self) -> Result<(), MonitorError> {
        let mut session = self.lock();
        let Some(active) = session.active.take() else {
            return Err(MonitorError::NotRunning);
        };

        active.stopper.stop();
        session.exiting = Some(active.thread);
        tracing::info!(keyword = %active.target.keyword, "monitoring stopped");
        Ok(())
    }

    pub fn status(&self) -> MonitorStatus {
        match &self.lock().active {
            Some(active) => MonitorStatus::Running(active.target.clone()),
            None => MonitorStatus::Idle,
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock().active.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        let session = self
            .session
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(active) = session.active.take() {
            active.stopper.stop();
            join_pump(active.thread);
        }
        if let Some(previous) = session.exiting.take() {
            join_pump(previous);
        }
    }
}

fn join_pump(thread: JoinHandle<()>) {
    if thread.join().is_err() {
        tracing::error!("shell hook thread panicked");
    }
}
