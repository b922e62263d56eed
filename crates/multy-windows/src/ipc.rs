use std::io::{self, BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use multy_core::ipc::{Command, PIPE_NAME, Response};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

/// Errors on either end of the daemon pipe.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("failed to create named pipe {PIPE_NAME}")]
    CreatePipe,

    #[error("pipe operation failed: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("pipe I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("peer closed the pipe without sending a message")]
    Closed,
}

/// A Named Pipe server that the daemon uses to accept CLI connections.
///
/// Each connection carries exactly one request line and one response
/// line.
pub struct PipeServer {
    handle: HANDLE,
}

impl PipeServer {
    /// Creates the pipe without waiting for connections.
    pub fn create() -> Result<Self, IpcError> {
        let pipe_name = HSTRING::from(PIPE_NAME);

        // SAFETY: parameters are valid; failure is INVALID_HANDLE_VALUE.
        let handle = unsafe {
            CreateNamedPipeW(
                &pipe_name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                4096, // output buffer size
                4096, // input buffer size
                0,    // default timeout
                None,
            )
        };

        if handle == INVALID_HANDLE_VALUE {
            return Err(IpcError::CreatePipe);
        }

        Ok(Self { handle })
    }

    /// Blocks until a client connects, then reads and parses its command.
    ///
    /// On `IpcError::Json` the client is still connected and should get
    /// an error response.
    pub fn accept_command(&self) -> Result<Command, IpcError> {
        // SAFETY: ConnectNamedPipe blocks until a client connects.
        unsafe {
            ConnectNamedPipe(self.handle, None)?;
        }

        let reader = duplicate_handle_as_file(self.handle)?;
        let mut line = String::new();
        if BufReader::new(reader).read_line(&mut line)? == 0 {
            return Err(IpcError::Closed);
        }

        Ok(serde_json::from_str(line.trim())?)
    }

    /// Sends a response back to the connected client and disconnects.
    pub fn send_response(&self, response: &Response) -> Result<(), IpcError> {
        let mut writer = duplicate_handle_as_file(self.handle)?;
        let json = serde_json::to_string(response)?;
        writeln!(writer, "{json}")?;
        writer.flush()?;

        // Wait for the client to read everything; disconnecting first
        // discards unread data.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
        }

        self.disconnect()
    }

    /// Drops the current client so the next one can connect.
    pub fn disconnect(&self) -> Result<(), IpcError> {
        unsafe {
            DisconnectNamedPipe(self.handle)?;
        }
        Ok(())
    }
}

impl Drop for PipeServer {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// RAII guard that closes a HANDLE on drop.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Sends a command to the daemon and returns its response.
pub fn send_command(command: &Command) -> Result<Response, IpcError> {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: CreateFileW opens an existing named pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &pipe_name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    };

    let _guard = HandleGuard(handle);

    let json = serde_json::to_string(command)?;
    let mut writer = duplicate_handle_as_file(handle)?;
    writeln!(writer, "{json}")?;
    writer.flush()?;

    let reader = duplicate_handle_as_file(handle)?;
    let mut response_line = String::new();
    if BufReader::new(reader).read_line(&mut response_line)? == 0 {
        return Err(IpcError::Closed);
    }

    Ok(serde_json::from_str(response_line.trim())?)
}

/// Checks whether the daemon's pipe exists without consuming a
/// connection.
pub fn is_daemon_running() -> bool {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW only probes; 1 ms returns almost at once.
    unsafe { WaitNamedPipeW(&pipe_name, 1).as_bool() }
}

/// Duplicates a HANDLE and wraps it as a `std::fs::File`, so the File
/// and the original handle close independently.
fn duplicate_handle_as_file(handle: HANDLE) -> Result<std::fs::File, IpcError> {
    let mut dup = HANDLE::default();

    // SAFETY: the duplicate is owned by the returned File.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )?;

        Ok(std::fs::File::from_raw_handle(dup.0))
    }
}
