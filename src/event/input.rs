//! Key events decoupled from crossterm.
//!
//! Crossterm key events convert via `From`, so dialogs and bindings never
//! depend on crossterm directly.

use std::ops::{BitAnd, BitOr};

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// Any key code without a mapping here. Never bound by default.
    Unknown,
}

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);
    /// Command / super / windows key.
    pub const META: Modifiers = Modifiers(8);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether any bit of `other` is set in `self`.
    pub fn intersects(self, other: Modifiers) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers as Km;

    let mut out = Modifiers::NONE;
    if m.contains(Km::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(Km::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(Km::ALT) {
        out = out | Modifiers::ALT;
    }
    if m.intersects(Km::META | Km::SUPER) {
        out = out | Modifiers::META;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyCode;

        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        };
        KeyEvent {
            code,
            modifiers: convert_modifiers(ct.modifiers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::META;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::META));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(mods & Modifiers::META, Modifiers::META);
    }

    #[test]
    fn intersects_any_bit() {
        let either = Modifiers::CTRL | Modifiers::META;
        assert!(Modifiers::META.intersects(either));
        assert!(!Modifiers::ALT.intersects(either));
        assert!(Modifiers::CTRL.contains(Modifiers::NONE));
    }

    #[test]
    fn from_crossterm_escape() {
        let ke: KeyEvent = crossterm::event::KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE).into();
        assert_eq!(ke, KeyEvent::plain(Key::Escape));
    }

    #[test]
    fn from_crossterm_ctrl_enter() {
        let ke: KeyEvent =
            crossterm::event::KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL).into();
        assert_eq!(ke, KeyEvent::new(Key::Enter, Modifiers::CTRL));
    }

    #[test]
    fn from_crossterm_super_is_meta() {
        let ke: KeyEvent =
            crossterm::event::KeyEvent::new(KeyCode::Enter, KeyModifiers::SUPER).into();
        assert_eq!(ke.modifiers, Modifiers::META);
    }

    #[test]
    fn unmapped_code_is_unknown() {
        let ke: KeyEvent =
            crossterm::event::KeyEvent::new(KeyCode::CapsLock, KeyModifiers::NONE).into();
        assert_eq!(ke.code, Key::Unknown);
    }
}
