//! Key names accepted in hotkey bindings and their virtual-key codes.

const VK_F1: u32 = 0x70;

/// Named keys other than letters, digits and function keys.
const NAMED_KEYS: &[(&[&str], u32)] = &[
    (&["ENTER", "RETURN"], 0x0D),
    (&["TAB"], 0x09),
    (&["ESCAPE", "ESC"], 0x1B),
    (&["SPACE"], 0x20),
    (&["BACKSPACE"], 0x08),
    (&["PAUSE"], 0x13),
    (&["PAGEUP", "PGUP"], 0x21),
    (&["PAGEDOWN", "PGDN"], 0x22),
    (&["END"], 0x23),
    (&["HOME"], 0x24),
    (&["LEFT"], 0x25),
    (&["UP"], 0x26),
    (&["RIGHT"], 0x27),
    (&["DOWN"], 0x28),
    (&["INSERT", "INS"], 0x2D),
    (&["DELETE", "DEL"], 0x2E),
    (&["NUMPAD0"], 0x60),
    (&["NUMPAD1"], 0x61),
    (&["NUMPAD2"], 0x62),
    (&["NUMPAD3"], 0x63),
    (&["NUMPAD4"], 0x64),
    (&["NUMPAD5"], 0x65),
    (&["NUMPAD6"], 0x66),
    (&["NUMPAD7"], 0x67),
    (&["NUMPAD8"], 0x68),
    (&["NUMPAD9"], 0x69),
    (&["SEMICOLON"], 0xBA),
    (&["PLUS", "EQUALS"], 0xBB),
    (&["COMMA"], 0xBC),
    (&["MINUS"], 0xBD),
    (&["PERIOD", "DOT"], 0xBE),
    (&["SLASH"], 0xBF),
    (&["BACKTICK", "GRAVE"], 0xC0),
    (&["LBRACKET"], 0xDB),
    (&["BACKSLASH"], 0xDC),
    (&["RBRACKET"], 0xDD),
    (&["QUOTE"], 0xDE),
];

/// Resolves a key name to its virtual-key code, ignoring case.
///
/// Accepts single letters and digits, `F1`..`F24` and the names in
/// [`NAMED_KEYS`].
pub fn vk_from_name(name: &str) -> Option<u32> {
    let upper = name.trim().to_ascii_uppercase();

    if let [ch] = upper.as_bytes()
        && ch.is_ascii_alphanumeric()
    {
        return Some(u32::from(*ch));
    }

    if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u32>().ok())
        && (1..=24).contains(&n)
    {
        return Some(VK_F1 + n - 1);
    }

    NAMED_KEYS
        .iter()
        .find(|(names, _)| names.contains(&upper.as_str()))
        .map(|(_, vk)| *vk)
}

/// Returns whether `name` is a key that [`vk_from_name`] accepts.
pub fn is_known(name: &str) -> bool {
    vk_from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_ignore_case() {
        // Assert
        assert_eq!(vk_from_name("q"), Some(0x51));
        assert_eq!(vk_from_name("Q"), Some(0x51));
        assert_eq!(vk_from_name("7"), Some(0x37));
    }

    #[test]
    fn function_keys_up_to_f24() {
        // Assert
        assert_eq!(vk_from_name("F1"), Some(0x70));
        assert_eq!(vk_from_name("f13"), Some(0x7C));
        assert_eq!(vk_from_name("F24"), Some(0x87));
        assert_eq!(vk_from_name("F25"), None);
        assert_eq!(vk_from_name("F0"), None);
    }

    #[test]
    fn named_keys_and_aliases() {
        // Assert
        assert_eq!(vk_from_name("Enter"), Some(0x0D));
        assert_eq!(vk_from_name("return"), Some(0x0D));
        assert_eq!(vk_from_name("numpad5"), Some(0x65));
        assert_eq!(vk_from_name(" Space "), Some(0x20));
    }

    #[test]
    fn unknown_names_are_rejected() {
        // Assert
        assert!(!is_known(""));
        assert!(!is_known("Hyper"));
        assert!(!is_known("FX"));
        assert!(is_known("Tab"));
    }
}
