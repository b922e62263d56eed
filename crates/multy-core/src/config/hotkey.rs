use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HotkeyError;
use crate::keys;

/// A global key combination that focuses a window by title keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    /// Key name (e.g. "F1", "Q", "Numpad3").
    pub key: String,
    /// Modifier keys held with `key`.
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Title keyword of the window to focus.
    pub window: String,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Modifier {
    const ALL: [Self; 4] = [Self::Ctrl, Self::Alt, Self::Shift, Self::Win];

    fn name(self) -> &'static str {
        match self {
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Ctrl => "ctrl",
            Self::Win => "win",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alt" => Ok(Self::Alt),
            "shift" => Ok(Self::Shift),
            "ctrl" | "control" => Ok(Self::Ctrl),
            "win" | "super" => Ok(Self::Win),
            other => Err(format!("unknown modifier '{other}' (expected alt, shift, ctrl or win)")),
        }
    }
}

impl HotkeyBinding {
    pub fn new(key: impl Into<String>, modifiers: Vec<Modifier>, window: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers,
            window: window.into(),
        }
    }

    /// Checks that the key name is known and the window keyword is set.
    pub fn validate(&self) -> Result<(), HotkeyError> {
        if !keys::is_known(&self.key) {
            return Err(HotkeyError::UnknownKey {
                key: self.key.clone(),
            });
        }
        if self.window.trim().is_empty() {
            return Err(HotkeyError::EmptyWindow {
                key: self.key.clone(),
            });
        }
        Ok(())
    }

    /// Returns whether both bindings are triggered by the same keys,
    /// regardless of key-name case and modifier order.
    pub fn same_combo(&self, other: &Self) -> bool {
        keys::vk_from_name(&self.key) == keys::vk_from_name(&other.key)
            && Modifier::ALL
                .iter()
                .all(|m| self.modifiers.contains(m) == other.modifiers.contains(m))
    }

    /// Human-readable combination, e.g. `ctrl+alt+F1`.
    pub fn combo(&self) -> String {
        let mut parts: Vec<String> = Modifier::ALL
            .iter()
            .filter(|m| self.modifiers.contains(*m))
            .map(ToString::to_string)
            .collect();
        parts.push(self.key.clone());
        parts.join("+")
    }
}

/// Adds `binding`, replacing any binding with the same combination.
///
/// Returns the replaced binding, if any.
pub fn upsert(bindings: &mut Vec<HotkeyBinding>, binding: HotkeyBinding) -> Option<HotkeyBinding> {
    match bindings.iter().position(|b| b.same_combo(&binding)) {
        Some(i) => Some(std::mem::replace(&mut bindings[i], binding)),
        None => {
            bindings.push(binding);
            None
        }
    }
}

/// Swaps the live hotkey set for one that also holds `binding`.
///
/// `apply` replaces whatever set the OS currently holds with the one it
/// is given and reports the indices the OS refused. When the new set
/// cannot be applied, or the OS refuses `binding` itself, `current` is
/// applied again. Returns the set that is live afterwards, which is
/// empty if even `current` could not be restored, together with the
/// outcome for the caller.
pub fn register_with(
    current: &[HotkeyBinding],
    binding: HotkeyBinding,
    mut apply: impl FnMut(&[HotkeyBinding]) -> Result<Vec<usize>, HotkeyError>,
) -> (Vec<HotkeyBinding>, Result<Option<HotkeyBinding>, HotkeyError>) {
    if let Err(e) = binding.validate() {
        return (current.to_vec(), Err(e));
    }

    let mut next = current.to_vec();
    let replaced = upsert(&mut next, binding.clone());
    let index = next.iter().position(|b| b.same_combo(&binding));

    let failure = match (apply(&next), index) {
        (Ok(refused), Some(i)) if !refused.contains(&i) => {
            for r in refused {
                tracing::warn!(combo = %next[r].combo(), "hotkey refused by the OS");
            }
            return (next, Ok(replaced));
        }
        (Ok(_), _) => HotkeyError::Registration {
            message: format!("{} is already in use", binding.combo()),
        },
        (Err(e), _) => e,
    };

    let live = match apply(current) {
        Ok(_) => current.to_vec(),
        Err(e) => {
            tracing::error!("failed to restore hotkeys: {e}");
            Vec::new()
        }
    };
    (live, Err(failure))
}
