//! Dialog configuration and per-transition data.

use std::fmt;
use std::rc::Rc;

use crate::mixin::{Theme, Value};
use crate::widgets::ActionConfig;

/// Static configuration of a dialog.
#[derive(Clone)]
pub struct DialogConfig {
    /// Symbolic name, used in diagnostics.
    pub name: String,
    /// Title shown when the open data carries none.
    pub title: Option<String>,
    /// Actions installed when the open data carries none.
    pub actions: Vec<ActionConfig>,
    /// Whether Escape dismisses the dialog.
    pub escapable: bool,
    /// Theme handed to the dialog's elements and action widgets.
    pub theme: Option<Rc<dyn Theme>>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: None,
            actions: Vec::new(),
            escapable: true,
            theme: None,
        }
    }
}

impl DialogConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a default action (builder).
    pub fn with_action(mut self, action: ActionConfig) -> Self {
        self.actions.push(action);
        self
    }

    /// Set whether Escape dismisses the dialog (builder).
    pub fn escapable(mut self, escapable: bool) -> Self {
        self.escapable = escapable;
        self
    }

    /// Inject the theme (builder).
    pub fn with_theme(mut self, theme: Rc<dyn Theme>) -> Self {
        self.theme = Some(theme);
        self
    }
}

impl fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogConfig")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("actions", &self.actions)
            .field("escapable", &self.escapable)
            .field("theme", &self.theme.is_some())
            .finish()
    }
}

/// Data passed to [`Dialog::open`](super::Dialog::open). Each field overrides
/// the configured default when set.
#[derive(Debug, Clone, Default)]
pub struct OpenData {
    /// `None` keeps the configured title; `Some(None)` clears it.
    pub title: Option<Option<String>>,
    pub actions: Option<Vec<ActionConfig>>,
}

impl OpenData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    /// Open without a title, even if one is configured.
    pub fn without_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionConfig>) -> Self {
        self.actions = Some(actions);
        self
    }
}

/// Data passed to [`Dialog::close`](super::Dialog::close).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloseData {
    /// Result value handed back to whoever opened the dialog.
    pub value: Value,
}

impl CloseData {
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
