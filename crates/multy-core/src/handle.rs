use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a top-level window.
///
/// Holds the pointer-sized value of an OS window handle (`HWND` on
/// Windows). A handle is only meaningful while the window it names
/// exists, and it is never dereferenced by this crate, so it is a plain
/// value that can be copied freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// Wraps a raw handle value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub const fn raw(self) -> usize {
        self.0
    }

    /// Returns whether this is the null handle.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_hex() {
        // Assert
        assert_eq!(WindowHandle::from_raw(0x1A2B).to_string(), "0x1A2B");
        assert_eq!(WindowHandle::from_raw(0).to_string(), "0x0");
    }

    #[test]
    fn serializes_as_bare_number() {
        // Act
        let json = serde_json::to_string(&WindowHandle::from_raw(42)).unwrap();

        // Assert
        assert_eq!(json, "42");
    }

    #[test]
    fn null_handle_is_detected() {
        // Assert
        assert!(WindowHandle::from_raw(0).is_null());
        assert!(!WindowHandle::from_raw(7).is_null());
    }
}
