#![cfg(windows)]

/// Middle-click forwarding through a low-level mouse hook.
pub mod click;

/// Ctrl+C handling for foreground commands.
pub mod ctrl_c;

/// Daemon main loop.
pub mod daemon;

/// Global hotkeys that focus windows.
pub mod hotkey;

/// IPC via Named Pipes.
pub mod ipc;

/// Process utilities (alive check, kill).
pub mod process;

/// Shell-hook listener window and its message pump.
pub mod shell_hook;

/// `WindowManager` and `PointerInput` over Win32.
pub mod window_manager;

mod message_loop;

pub use click::ClickService;
pub use hotkey::HotkeyService;
pub use shell_hook::Win32ShellHook;
pub use window_manager::Win32WindowManager;
