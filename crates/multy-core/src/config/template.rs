/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `multy init` to create a starter config file.
pub fn generate_config() -> String {
    r##"# multy configuration
# Location: ~/.config/multy/config.toml

[logging]
# Write the daemon log to ~/.config/multy/logs/multy.log.
enabled = true
# Minimum log level: "trace", "debug", "info", "warn", or "error".
# The RUST_LOG environment variable takes precedence.
level = "info"
# The log is rotated to multy.log.1 at startup once it exceeds this size (MB).
max_file_mb = 10

[monitor]
# Title keyword used by `multy monitor start` when none is given.
keyword = "Dofus"
# Start monitoring as soon as the daemon starts.
autostart = false

[click]
# Middle clicks are replayed as left clicks into every window whose
# title contains this keyword.
keyword = "Dofus"
# Delay after moving the cursor before pressing, in milliseconds.
settle_ms = 50
# Time between button down and button up, in milliseconds.
press_ms = 15

[gate]
# Pause click forwarding and hotkeys while the foreground window's title
# does not contain the keyword. They resume once a game window is focused.
enabled = false
keyword = "Dofus"

# Hotkeys that focus a window by title keyword. Registered at daemon start.
# Modifiers: alt, shift, ctrl, win.
#
# [[hotkey]]
# key = "F1"
# modifiers = ["ctrl"]
# window = "Dofus - MyCharacter"
"##
    .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
