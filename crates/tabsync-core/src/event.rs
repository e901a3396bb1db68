#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native key events (DOM `KeyboardEvent`, terminal
//! escape sequences) into [`KeyEvent`] before handing them to widgets.

use bitflags::bitflags;

/// A logical key, independent of the host's keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    /// `ArrowLeft`.
    Left,
    /// `ArrowRight`.
    Right,
    /// `ArrowUp`.
    Up,
    /// `ArrowDown`.
    Down,
    Enter,
    Tab,
    Home,
    End,
    Escape,
    Backspace,
    /// A printable character.
    Char(char),
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` name to a key code.
    ///
    /// Single-character names map to [`KeyCode::Char`]; unknown names yield
    /// `None`.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let code = match key {
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Home" => Self::Home,
            "End" => Self::End,
            "Escape" => Self::Escape,
            "Backspace" => Self::Backspace,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::Char(ch),
                    _ => return None,
                }
            }
        };
        Some(code)
    }
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// True when no modifier key is held.
    #[inline]
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_map_to_codes() {
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), Some(KeyCode::Right));
        assert_eq!(KeyCode::from_dom_key("Enter"), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_dom_key("x"), Some(KeyCode::Char('x')));
        assert_eq!(KeyCode::from_dom_key("é"), Some(KeyCode::Char('é')));
        assert_eq!(KeyCode::from_dom_key("F13"), None);
        assert_eq!(KeyCode::from_dom_key(""), None);
    }

    #[test]
    fn modifiers_default_to_plain() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert!(key.is_plain());
        let chord = key.with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(!chord.is_plain());
        assert!(chord.modifiers.contains(Modifiers::CTRL));
        assert_eq!(KeyEvent::from(KeyCode::Enter), key);
    }
}
