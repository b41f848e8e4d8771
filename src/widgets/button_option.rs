//! Button option: a selectable option rendered as a button.
//!
//! Selecting the option also marks the button active.

use std::any::Any;

use super::place_parts;
use crate::capabilities::{Indicator, IndicatorConfig, LabelConfig, Labelled, Titled, TitledConfig};
use crate::dom::{NodeData, NodeId};
use crate::mixin::{Element, MixinError, TextSource, Value};
use crate::widget::traits::Component;

const SELECTED_CLASS: &str = "ui-optionWidget-selected";
const ACTIVE_CLASS: &str = "ui-buttonElement-active";

#[derive(Debug, Clone, Default)]
pub struct ButtonOptionConfig {
    pub label: Option<TextSource>,
    pub title: Option<TextSource>,
    pub indicator: Option<String>,
    /// Payload identifying the option to its select.
    pub data: Value,
    pub selected: bool,
}

impl ButtonOptionConfig {
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

    pub fn with_indicator(mut self, name: impl Into<String>) -> Self {
        self.indicator = Some(name.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

#[derive(Debug)]
pub struct ButtonOptionWidget {
    element: Element,
    button: NodeId,
    data: Value,
    selected: bool,
}

impl ButtonOptionWidget {
    pub fn new(config: ButtonOptionConfig) -> Result<Self, MixinError> {
        let mut element = Element::new("ButtonOptionWidget", "div");
        let root = element.root();
        element.update_node(root, |n| {
            n.add_class("ui-optionWidget");
            n.add_class("ui-buttonOptionWidget");
            n.set_attr("role", "option");
        });
        let button = element
            .dom_mut()
            .insert_child(root, NodeData::new("a").with_class("ui-buttonElement-button"));

        Labelled::mixin(
            &mut element,
            LabelConfig {
                label: config.label,
                label_node: None,
            },
        )?;
        Indicator::mixin(
            &mut element,
            IndicatorConfig {
                indicator: config.indicator,
                ..IndicatorConfig::default()
            },
        )?;
        place_parts(&mut element, button, &["label", "indicator"])?;
        Titled::mixin(
            &mut element,
            TitledConfig {
                title: config.title,
                titled: Some(button),
                ..TitledConfig::default()
            },
        )?;

        let mut widget = Self {
            element,
            button,
            data: config.data,
            selected: false,
        };
        widget.set_selected(config.selected);
        Ok(widget)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        let root = self.element.root();
        self.element.update_node(root, |n| {
            n.set_class(SELECTED_CLASS, selected);
            n.set_attr("aria-selected", selected.to_string());
            n.set_class(ACTIVE_CLASS, selected);
        });
    }
}

impl Component for ButtonOptionWidget {
    fn widget_type(&self) -> &str {
        "ButtonOptionWidget"
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn own_methods(&self) -> &'static [&'static str] {
        &["is_selected", "set_selected", "get_data"]
    }

    fn call_own(&mut self, method: &str, args: &[Value]) -> Option<Result<Value, MixinError>> {
        let result = match method {
            "is_selected" => Ok(self.selected.into()),
            "set_selected" => {
                self.set_selected(args.first().and_then(Value::as_bool).unwrap_or(false));
                Ok(Value::Null)
            }
            "get_data" => Ok(self.data.clone()),
            _ => return None,
        };
        Some(result)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_marks_active() {
        let mut w =
            ButtonOptionWidget::new(ButtonOptionConfig::new("b").with_label("Bold")).unwrap();
        assert!(!w.is_selected());
        w.set_selected(true);
        let root = w.element().root_data().unwrap();
        assert!(root.has_class(SELECTED_CLASS));
        assert!(root.has_class(ACTIVE_CLASS));
        assert_eq!(root.attr("aria-selected"), Some("true"));
        w.invoke("set_selected", &[]).unwrap();
        assert!(!w.element().root_data().unwrap().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn title_lives_on_button() {
        let w = ButtonOptionWidget::new(
            ButtonOptionConfig::new(1_i64).with_title("Make bold").selected(true),
        )
        .unwrap();
        assert!(w.is_selected());
        assert_eq!(w.delegated_property("titled"), Ok(w.button()));
        assert_eq!(
            w.element().dom().get(w.button()).and_then(|n| n.attr("title")),
            Some("Make bold")
        );
        assert_eq!(w.data(), &Value::Int(1));
    }
}
