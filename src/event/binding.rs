//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`BindingAction`]s.
//! `dialog_defaults()` installs the bindings every dialog listens for.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

/// What a dialog does when a binding matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAction {
    /// Run the empty action, which closes the dialog. Ignored when the dialog
    /// is not escapable.
    Dismiss,
    /// Run the first visible, enabled action flagged `primary`.
    Primary,
    /// Run the named action.
    Action(String),
}

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug, Clone, Default)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard dialog bindings.
    ///
    /// - `Escape` -> Dismiss
    /// - `Ctrl+Enter`, `Meta+Enter` (and both together) -> Primary
    pub fn dialog_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Escape, Modifiers::NONE, BindingAction::Dismiss);
        for mods in [Modifiers::CTRL, Modifiers::META, Modifiers::CTRL | Modifiers::META] {
            registry.bind(Key::Enter, mods, BindingAction::Primary);
        }
        registry
    }

    /// Register a key binding, replacing any existing one for the same combination.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding, returning the removed action.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for an exact key + modifiers match.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_is_empty() {
        let reg = KeyBindingRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn dialog_defaults() {
        let reg = KeyBindingRegistry::dialog_defaults();
        assert_eq!(reg.len(), 4);
        assert_eq!(
            reg.resolve(&KeyEvent::plain(Key::Escape)),
            Some(&BindingAction::Dismiss)
        );
        assert_eq!(
            reg.resolve(&KeyEvent::new(Key::Enter, Modifiers::META)),
            Some(&BindingAction::Primary)
        );
        assert_eq!(
            reg.resolve(&KeyEvent::new(Key::Enter, Modifiers::CTRL | Modifiers::META)),
            Some(&BindingAction::Primary)
        );
    }

    #[test]
    fn plain_enter_unbound() {
        let reg = KeyBindingRegistry::dialog_defaults();
        assert!(reg.resolve(&KeyEvent::plain(Key::Enter)).is_none());
    }

    #[test]
    fn resolve_wrong_modifiers() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Char('s'), Modifiers::CTRL, BindingAction::Action("save".into()));
        assert!(reg.resolve(&KeyEvent::plain(Key::Char('s'))).is_none());
        assert_eq!(
            reg.resolve(&KeyEvent::new(Key::Char('s'), Modifiers::CTRL)),
            Some(&BindingAction::Action("save".into()))
        );
    }

    #[test]
    fn bind_overwrites_and_unbind_removes() {
        let mut reg = KeyBindingRegistry::dialog_defaults();
        reg.bind(Key::Escape, Modifiers::NONE, BindingAction::Action("cancel".into()));
        assert_eq!(reg.len(), 4);
        assert_eq!(
            reg.unbind(Key::Escape, Modifiers::NONE),
            Some(BindingAction::Action("cancel".into()))
        );
        assert!(reg.resolve(&KeyEvent::plain(Key::Escape)).is_none());
        assert_eq!(reg.unbind(Key::Escape, Modifiers::NONE), None);
    }
}
