pub mod hotkey;
mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

pub use crate::log::LogConfig;
pub use hotkey::{HotkeyBinding, Modifier};
pub use loader::{ConfigError, config_dir, config_path, load, try_load};

/// Keyword used for the game windows when none is configured.
pub const DEFAULT_KEYWORD: &str = "Dofus";

/// Top-level configuration for multy.
///
/// Loaded from `~/.config/multy/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LogConfig,
    pub monitor: MonitorConfig,
    pub click: ClickConfig,
    pub gate: GateConfig,
    /// Hotkeys registered when the daemon starts (`[[hotkey]]` tables).
    #[serde(rename = "hotkey")]
    pub hotkeys: Vec<HotkeyBinding>,
}

/// Foreground monitor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Title keyword used when `multy monitor start` gets none.
    pub keyword: String,
    /// Start monitoring as soon as the daemon is up.
    pub autostart: bool,
}

/// Middle-click forwarding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Every window whose title contains this receives the click.
    pub keyword: String,
    /// Delay after moving the cursor, before pressing.
    pub settle_ms: u64,
    /// Time between button down and button up.
    pub press_ms: u64,
}

/// Pausing clicks and hotkeys while no game window is focused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub enabled: bool,
    /// A window whose title contains this counts as the game.
    pub keyword: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.into(),
            autostart: false,
        }
    }
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.into(),
            settle_ms: 50,
            press_ms: 15,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            keyword: DEFAULT_KEYWORD.into(),
        }
    }
}

impl Config {
    /// Clamps values to safe ranges and drops unusable hotkeys.
    ///
    /// Empty keywords revert to [`DEFAULT_KEYWORD`]; an empty keyword
    /// would match every window.
    pub fn validate(&mut self) {
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 100);
        self.click.settle_ms = self.click.settle_ms.min(1000);
        self.click.press_ms = self.click.press_ms.min(500);

        for keyword in [
            &mut self.monitor.keyword,
            &mut self.click.keyword,
            &mut self.gate.keyword,
        ] {
            if keyword.trim().is_empty() {
                *keyword = DEFAULT_KEYWORD.into();
            }
        }

        self.hotkeys.retain(|binding| match binding.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("ignoring hotkey from config: {e}");
                false
            }
        });
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
