//! Action widget: a labelled, flaggable button that names a dialog action.
//!
//! Composes the label, indicator, titled and access-key capabilities around an
//! inner button node. Flags become `ui-flaggedElement-<flag>` classes on the
//! root; dialogs use them to find e.g. the `primary` action.

use std::any::Any;
use std::rc::Rc;

use super::place_parts;
use crate::capabilities::{
    AccessKeyConfig, AccessKeyed, Indicator, IndicatorConfig, LabelConfig, Labelled, Titled,
    TitledConfig,
};
use crate::dom::{NodeData, NodeId};
use crate::mixin::{Element, MixinError, TextSource, Theme, Value};
use crate::widget::traits::Component;

const ROOT_CLASS: &str = "ui-actionWidget";
const BUTTON_CLASS: &str = "ui-buttonElement-button";
const FLAG_PREFIX: &str = "ui-flaggedElement-";
const DISABLED_CLASS: &str = "ui-widget-disabled";
const HIDDEN_CLASS: &str = "ui-element-hidden";

/// Options for [`ActionWidget`].
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Symbolic action name. Empty is the "close without data" action.
    pub action: String,
    pub label: Option<TextSource>,
    pub title: Option<TextSource>,
    pub access_key: Option<TextSource>,
    pub indicator: Option<String>,
    pub flags: Vec<String>,
    pub disabled: bool,
    pub visible: bool,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            action: String::new(),
            label: None,
            title: None,
            access_key: None,
            indicator: None,
            flags: Vec::new(),
            disabled: false,
            visible: true,
        }
    }
}

impl ActionConfig {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
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

    pub fn with_access_key(mut self, key: impl Into<TextSource>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    pub fn with_indicator(mut self, name: impl Into<String>) -> Self {
        self.indicator = Some(name.into());
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

#[derive(Debug)]
pub struct ActionWidget {
    element: Element,
    button: NodeId,
    action: String,
    flags: Vec<String>,
    disabled: bool,
    visible: bool,
}

impl ActionWidget {
    pub fn new(config: ActionConfig) -> Result<Self, MixinError> {
        Self::build(Element::new("ActionWidget", "span"), config)
    }

    /// Like [`new`](Self::new), with a theme refreshing flag-dependent classes.
    pub fn themed(config: ActionConfig, theme: Rc<dyn Theme>) -> Result<Self, MixinError> {
        Self::build(Element::new("ActionWidget", "span").with_theme(theme), config)
    }

    fn build(mut element: Element, config: ActionConfig) -> Result<Self, MixinError> {
        let root = element.root();
        element.update_node(root, |n| n.add_class(ROOT_CLASS));
        let button = element.dom_mut().insert_child(
            root,
            NodeData::new("a")
                .with_class(BUTTON_CLASS)
                .with_attr("role", "button"),
        );

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
        AccessKeyed::mixin(
            &mut element,
            AccessKeyConfig {
                access_key: config.access_key,
                access_keyed: Some(button),
            },
        )?;

        let mut widget = Self {
            element,
            button,
            action: config.action,
            flags: Vec::new(),
            disabled: false,
            visible: true,
        };
        widget.set_flags(config.flags);
        widget.set_disabled(config.disabled);
        widget.set_visible(config.visible);
        Ok(widget)
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    pub fn label(&self) -> Option<&str> {
        self.element.capability::<Labelled>().and_then(Labelled::label)
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Replace all flags.
    pub fn set_flags(&mut self, flags: impl IntoIterator<Item = impl Into<String>>) {
        let root = self.element.root();
        let old = std::mem::take(&mut self.flags);
        for flag in flags {
            let flag = flag.into();
            if !flag.is_empty() && !self.flags.contains(&flag) {
                self.flags.push(flag);
            }
        }
        let current = &self.flags;
        self.element.update_node(root, |n| {
            for flag in &old {
                n.remove_class(&format!("{FLAG_PREFIX}{flag}"));
            }
            for flag in current {
                n.add_class(&format!("{FLAG_PREFIX}{flag}"));
            }
        });
        self.element.update_theme_classes();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        let (root, button) = (self.element.root(), self.button);
        self.element.update_node(root, |n| n.set_class(DISABLED_CLASS, disabled));
        self.element.update_node(button, |n| {
            if disabled {
                n.set_attr("aria-disabled", "true");
            } else {
                n.remove_attr("aria-disabled");
            }
        });
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        let root = self.element.root();
        self.element.update_node(root, |n| n.set_class(HIDDEN_CLASS, !visible));
    }
}

fn bool_arg(method: &'static str, args: &[Value]) -> Result<bool, MixinError> {
    args.first()
        .and_then(Value::as_bool)
        .ok_or_else(|| MixinError::InvalidArgument {
            method,
            reason: "expected a bool".to_owned(),
        })
}

impl Component for ActionWidget {
    fn widget_type(&self) -> &str {
        "ActionWidget"
    }

    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn own_methods(&self) -> &'static [&'static str] {
        &["get_action", "has_flag", "set_disabled", "is_disabled", "set_visible", "is_visible"]
    }

    fn call_own(&mut self, method: &str, args: &[Value]) -> Option<Result<Value, MixinError>> {
        let result = match method {
            "get_action" => Ok(self.action.clone().into()),
            "has_flag" => match args.first().and_then(Value::as_str) {
                Some(flag) => Ok(self.has_flag(flag).into()),
                None => Err(MixinError::InvalidArgument {
                    method: "has_flag",
                    reason: "expected a flag name".to_owned(),
                }),
            },
            "set_disabled" => bool_arg("set_disabled", args).map(|d| {
                self.set_disabled(d);
                Value::Null
            }),
            "is_disabled" => Ok(self.disabled.into()),
            "set_visible" => bool_arg("set_visible", args).map(|v| {
                self.set_visible(v);
                Value::Null
            }),
            "is_visible" => Ok(self.visible.into()),
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
    use crate::mixin::FlagAwareTheme;

    fn save() -> ActionWidget {
        ActionWidget::new(
            ActionConfig::new("save")
                .with_label("Save")
                .with_title("Save changes")
                .with_access_key("s")
                .with_flag("primary"),
        )
        .unwrap()
    }

    #[test]
    fn composes_capabilities_on_button() {
        let w = save();
        let button = w.element().dom().get(w.button()).unwrap();
        assert_eq!(button.attr("title"), Some("Save changes [s]"));
        assert_eq!(button.attr("accesskey"), Some("s"));
        assert_eq!(w.label(), Some("Save"));
        assert_eq!(w.delegated_property("titled"), Ok(w.button()));
        assert_eq!(
            w.element().mixins().kinds(),
            vec!["Labelled", "Indicator", "Titled", "AccessKeyed"]
        );
    }

    #[test]
    fn flags_become_root_classes() {
        let mut w = save();
        assert!(w.has_flag("primary"));
        assert!(w.element().root_data().unwrap().has_class("ui-flaggedElement-primary"));
        w.set_flags(["destructive", "destructive"]);
        let root = w.element().root_data().unwrap();
        assert!(!root.has_class("ui-flaggedElement-primary"));
        assert!(root.has_class("ui-flaggedElement-destructive"));
        assert_eq!(w.flags(), ["destructive".to_owned()]);
    }

    #[test]
    fn disabled_and_hidden_state() {
        let mut w =
            ActionWidget::new(ActionConfig::new("x").disabled(true).visible(false)).unwrap();
        let root = w.element().root_data().unwrap();
        assert!(root.has_class(DISABLED_CLASS) && root.has_class(HIDDEN_CLASS));
        w.invoke("set_disabled", &[false.into()]).unwrap();
        w.invoke("set_visible", &[true.into()]).unwrap();
        assert_eq!(w.invoke("is_disabled", &[]), Ok(Value::Bool(false)));
        let root = w.element().root_data().unwrap();
        assert!(!root.has_class(DISABLED_CLASS) && !root.has_class(HIDDEN_CLASS));
    }

    #[test]
    fn own_and_capability_dispatch() {
        let mut w = save();
        assert_eq!(w.invoke("get_action", &[]), Ok(Value::Str("save".into())));
        assert_eq!(w.invoke("has_flag", &["primary".into()]), Ok(Value::Bool(true)));
        assert_eq!(w.invoke("get_label", &[]), Ok(Value::Str("Save".into())));
        assert!(w.supports(&["get_action", "set_indicator", "format_title_with_access_key"]));
        assert!(w.invoke("set_visible", &["yes".into()]).is_err());
    }

    #[test]
    fn label_and_indicator_sit_inside_button() {
        let w = save();
        let dom = w.element().dom();
        let label = w.delegated_property("label").unwrap();
        let indicator = w.delegated_property("indicator").unwrap();
        assert_eq!(dom.children(w.button()), &[label, indicator]);
        assert_eq!(dom.ancestors(label), vec![w.button(), w.element().root()]);
    }

    #[test]
    fn themed_primary_inverts_indicator() {
        let w = ActionWidget::themed(
            ActionConfig::new("next").with_indicator("down").with_flag("primary"),
            Rc::new(FlagAwareTheme),
        )
        .unwrap();
        let node = w.delegated_property("indicator").unwrap();
        assert!(w.element().dom().get(node).unwrap().has_class(FlagAwareTheme::INVERT_CLASS));
    }
}
