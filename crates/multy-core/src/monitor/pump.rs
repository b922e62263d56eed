use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crate::{
    ForegroundForcer, MonitorError, NotificationEvent, NotificationFilter, NotificationPump,
    PlatformError, PumpMessage, PumpStopper, Reaction, Registration, ShellHook, WindowHandle,
};

type Ready = Result<Box<dyn PumpStopper>, PlatformError>;

/// Spawns the pump thread for `target` and waits until its shell hook is
/// registered.
///
/// Registration happens on the new thread because the listener window
/// and its message queue belong to the thread that creates them.
pub(super) fn spawn(
    hook: Arc<dyn ShellHook>,
    forcer: Arc<ForegroundForcer>,
    target: WindowHandle,
) -> Result<(Box<dyn PumpStopper>, JoinHandle<()>), MonitorError> {
    let (ready_tx, ready_rx) = mpsc::channel::<Ready>();

    let thread = thread::Builder::new()
        .name("multy-shell-hook".into())
        .spawn(move || {
            let Registration { mut pump, stopper } = match hook.register() {
                Ok(registration) => registration,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            if ready_tx.send(Ok(stopper)).is_err() {
                return;
            }
            run(pump.as_mut(), &forcer, NotificationFilter::new(target));
        })
        .map_err(|e| MonitorError::Registration {
            message: format!("failed to spawn shell hook thread: {e}"),
        })?;

    match ready_rx.recv() {
        Ok(Ok(stopper)) => Ok((stopper, thread)),
        Ok(Err(e)) => {
            let _ = thread.join();
            Err(MonitorError::Registration {
                message: e.to_string(),
            })
        }
        Err(_) => {
            let _ = thread.join();
            Err(MonitorError::Registration {
                message: "shell hook thread exited before registering".into(),
            })
        }
    }
}

/// Drains the pump until it reports `Quit`.
///
/// A notification dequeued before the quit signal is fully handled.
/// Retrieval errors are logged and the loop keeps going.
pub(super) fn run(
    pump: &mut dyn NotificationPump,
    forcer: &ForegroundForcer,
    mut filter: NotificationFilter,
) {
    tracing::debug!(target_window = %filter.target(), "shell hook pump running");
    loop {
        match pump.next_message() {
            PumpMessage::Quit => break,
            PumpMessage::Error(message) => {
                tracing::warn!(%message, "shell hook message retrieval failed");
            }
            PumpMessage::Notification(event) => react(&mut filter, forcer, event),
        }
    }
    tracing::debug!(target_window = %filter.target(), "shell hook pump exited");
}

fn react(filter: &mut NotificationFilter, forcer: &ForegroundForcer, event: NotificationEvent) {
    match filter.classify(event) {
        Reaction::Foreign | Reaction::Duplicate => {}
        Reaction::Activated => {
            tracing::debug!(handle = %event.source(), "tracked window activated");
        }
        Reaction::ForceFocus => {
            let handle = event.source();
            tracing::info!(%handle, "tracked window flashed, forcing foreground");
            if !forcer.activate(handle) {
                tracing::warn!(%handle, "tracked window could not be activated");
            }
        }
        Reaction::Ignored(code) => {
            tracing::debug!(code, handle = %event.source(), "ignored shell notification");
        }
    }
}
