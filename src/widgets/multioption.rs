//! Multioption: a labelled, titled option for multi-select lists.

use std::any::Any;
use std::fmt;

use crate::capabilities::{LabelConfig, Labelled, Titled, TitledConfig};
use crate::dom::NodeData;
use crate::mixin::{Element, MixinError, TextSource, Value};
use crate::widget::traits::Component;

const SELECTED_CLASS: &str = "ui-multioptionWidget-selected";

#[derive(Debug, Clone, Default)]
pub struct MultioptionConfig {
    pub label: Option<TextSource>,
    pub title: Option<TextSource>,
    pub data: Value,
    pub selected: bool,
}

impl MultioptionConfig {
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<TextSource>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<TextSource>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

type ChangeListener = Box<dyn FnMut(bool)>;

pub struct MultioptionWidget {
    element: Element,
    data: Value,
    selected: bool,
    listeners: Vec<ChangeListener>,
}

impl MultioptionWidget {
    pub fn new(config: MultioptionConfig) -> Result<Self, MixinError> {
        let mut element = Element::new("MultioptionWidget", "div");
        let root = element.root();
        element.update_node(root, |n| n.add_class("ui-multioptionWidget"));
        let label_node = element.dom_mut().insert_child(root, NodeData::new("span"));

        Labelled::mixin(
            &mut element,
            LabelConfig {
                label: config.label,
                label_node: Some(label_node),
            },
        )?;
        Titled::mixin(
            &mut element,
            TitledConfig {
                title: config.title,
                ..TitledConfig::default()
            },
        )?;

        let mut widget = Self {
            element,
            data: config.data,
            selected: false,
            listeners: Vec::new(),
        };
        widget.set_selected(config.selected);
        Ok(widget)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Register a listener called with the new state on every change.
    pub fn on_change(&mut self, listener: impl FnMut(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Set the selected state. Listeners run only when the state changes;
    /// returns whether it did.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        for listener in &mut self.listeners {
            listener(selected);
        }
        let root = self.element.root();
        self.element.update_node(root, |n| n.set_class(SELECTED_CLASS, selected));
        true
    }
}

impl fmt::Debug for MultioptionWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultioptionWidget")
            .field("element", &self.element)
            .field("data", &self.data)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Component for MultioptionWidget {
    fn widget_type(&self) -> &str {
        "MultioptionWidget"
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn own_methods(&self) -> &'static [&'static str] {
        &["is_selected", "set_selected"]
    }

    fn call_own(&mut self, method: &str, args: &[Value]) -> Option<Result<Value, MixinError>> {
        match method {
            "is_selected" => Some(Ok(self.selected.into())),
            "set_selected" => {
                let state = args.first().and_then(Value::as_bool).unwrap_or(false);
                Some(Ok(self.set_selected(state).into()))
            }
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
