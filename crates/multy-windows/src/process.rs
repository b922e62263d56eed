use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE, TerminateProcess,
};

/// Checks whether a process with the given PID is still alive.
///
/// Used to detect stale PID files left behind when the daemon was
/// killed without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: OpenProcess only opens a handle to an existing process.
    let result = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) };

    match result {
        Ok(handle) => {
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(_) => false,
    }
}

/// Forcefully terminates a process.
///
/// Last resort for `multy stop` when the daemon no longer answers on
/// its pipe.
pub fn kill_process(pid: u32) -> windows::core::Result<()> {
    // SAFETY: the handle is closed on every path after use.
    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, false, pid)?;
        let result = TerminateProcess(handle, 1);
        let _ = CloseHandle(handle);
        result
    }
}
