//! Indicator capability: a small status glyph named symbolically
//! (`required`, `down`, `clear`, ...).
//!
//! The glyph itself is drawn by the rendering collaborator from the classes
//! this capability maintains:
//!
//! - `ui-indicatorElement-indicator` on the indicator node, always;
//! - `ui-indicator-<name>` on the indicator node while an indicator is set;
//! - `ui-indicatorElement-noIndicator` on the indicator node while none is set;
//! - `ui-indicatorElement` on the host root while an indicator is set.
//!
//! After each change the host's injected theme gets a chance to adjust.

use super::{node_arg, text_arg};
use crate::dom::{NodeData, NodeId};
use crate::mixin::{resolve_text, CapabilityType, Element, Method, MixinError, TextSource, Value};

const INDICATOR_CLASS: &str = "ui-indicatorElement-indicator";
const NO_INDICATOR_CLASS: &str = "ui-indicatorElement-noIndicator";
const HOST_CLASS: &str = "ui-indicatorElement";

fn named_class(name: &str) -> String {
    format!("ui-indicator-{name}")
}

/// Trim and drop empty names.
fn normalize(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())
}

/// Options for [`Indicator::mixin`].
#[derive(Debug, Clone, Default)]
pub struct IndicatorConfig {
    /// Indicator name. Omitted falls back to `default_indicator`.
    pub indicator: Option<String>,
    /// The host type's own default indicator.
    pub default_indicator: Option<String>,
    /// Tooltip for the indicator node.
    pub indicator_title: Option<TextSource>,
    /// Node to use. A fresh detached `span` is created when omitted.
    pub indicator_node: Option<NodeId>,
}

impl IndicatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indicator(mut self, name: impl Into<String>) -> Self {
        self.indicator = Some(name.into());
        self
    }

    pub fn with_default_indicator(mut self, name: impl Into<String>) -> Self {
        self.default_indicator = Some(name.into());
        self
    }

    pub fn with_indicator_title(mut self, title: impl Into<TextSource>) -> Self {
        self.indicator_title = Some(title.into());
        self
    }

    pub fn with_indicator_node(mut self, node: NodeId) -> Self {
        self.indicator_node = Some(node);
        self
    }
}

#[derive(Debug, Default)]
pub struct Indicator {
    node: Option<NodeId>,
    indicator: Option<String>,
    indicator_title: Option<String>,
}

impl Indicator {
    /// Attach to `host` and apply `config`.
    pub fn mixin(host: &mut Element, config: IndicatorConfig) -> Result<usize, MixinError> {
        let slot = host.attach(Indicator {
            indicator_title: resolve_text(config.indicator_title.as_ref()),
            ..Indicator::default()
        });
        Self::set_indicator_in(host, slot, config.indicator.or(config.default_indicator))?;
        let node = match config.indicator_node {
            Some(node) => node,
            None => host.create_node(NodeData::new("span")),
        };
        Self::set_indicator_element_in(host, slot, node)?;
        Ok(slot)
    }

    pub fn indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_indicator_element_in(
        host: &mut Element,
        slot: usize,
        node: NodeId,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        let previous = me.node.replace(node);
        let name = me.indicator.clone();
        let title = me.indicator_title.clone();

        if let Some(old) = previous {
            host.update_node(old, |n| {
                n.remove_class(INDICATOR_CLASS);
                n.remove_class(NO_INDICATOR_CLASS);
                if let Some(name) = &name {
                    n.remove_class(&named_class(name));
                }
                n.remove_attr("title");
            });
        }

        host.update_node(node, |n| {
            n.add_class(INDICATOR_CLASS);
            n.set_class(NO_INDICATOR_CLASS, name.is_none());
            if let Some(name) = &name {
                n.add_class(&named_class(name));
            }
            if let Some(title) = title {
                n.set_attr("title", title);
            }
        });

        host.update_theme_classes();
        Ok(())
    }

    fn set_indicator_in(
        host: &mut Element,
        slot: usize,
        name: Option<String>,
    ) -> Result<(), MixinError> {
        let name = normalize(name);
        let me = host.slot_mut::<Self>(slot)?;
        let node = me.node;
        let previous = std::mem::replace(&mut me.indicator, name.clone());

        if let Some(node) = node {
            host.update_node(node, |n| {
                if previous != name {
                    if let Some(old) = &previous {
                        n.remove_class(&named_class(old));
                    }
                    if let Some(new) = &name {
                        n.add_class(&named_class(new));
                    }
                }
                n.set_class(NO_INDICATOR_CLASS, name.is_none());
            });
        }
        let root = host.root();
        let has = host.slot::<Self>(slot)?.indicator.is_some();
        host.update_node(root, |n| n.set_class(HOST_CLASS, has));

        host.update_theme_classes();
        Ok(())
    }

    fn set_indicator_title_in(
        host: &mut Element,
        slot: usize,
        title: Option<String>,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        me.indicator_title = title.clone();
        if let Some(node) = me.node {
            host.update_node(node, |n| match title {
                Some(t) => n.set_attr("title", t),
                None => n.remove_attr("title"),
            });
        }
        Ok(())
    }

    fn call_set_indicator(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let name = text_arg("set_indicator", args)?;
        Self::set_indicator_in(host, slot, name)?;
        Ok(Value::Null)
    }

    fn call_get_indicator(
        host: &mut Element,
        slot: usize,
        _: &[Value],
    ) -> Result<Value, MixinError> {
        Ok(host.slot::<Self>(slot)?.indicator.clone().into())
    }

    fn call_set_indicator_element(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let node = node_arg("set_indicator_element", args)?;
        Self::set_indicator_element_in(host, slot, node)?;
        Ok(Value::Null)
    }

    fn call_set_indicator_title(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let title = text_arg("set_indicator_title", args)?;
        Self::set_indicator_title_in(host, slot, title)?;
        Ok(Value::Null)
    }
}

impl CapabilityType for Indicator {
    const KIND: &'static str = "Indicator";
    const TARGET_PROPERTY: Option<&'static str> = Some("indicator");
    const METHODS: &'static [Method] = &[
        Method::new("set_indicator", Self::call_set_indicator),
        Method::new("get_indicator", Self::call_get_indicator),
        Method::new("set_indicator_element", Self::call_set_indicator_element),
        Method::new("set_indicator_title", Self::call_set_indicator_title),
    ];

    fn target(&self) -> Option<NodeId> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::mixin::{FlagAwareTheme, Theme};

    fn node_of(host: &Element) -> NodeId {
        host.capability::<Indicator>().and_then(Indicator::node).unwrap()
    }

    fn classes(host: &Element, node: NodeId) -> Vec<String> {
        host.dom().get(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    #[test]
    fn creates_detached_span() {
        let mut host = Element::new("Option", "div");
        Indicator::mixin(&mut host, IndicatorConfig::new().with_indicator("down")).unwrap();
        let node = node_of(&host);
        assert_eq!(host.dom().parent(node), None);
        assert_eq!(host.dom().get(node).map(|n| n.tag.as_str()), Some("span"));
        assert_eq!(
            classes(&host, node),
            vec!["ui-indicatorElement-indicator", "ui-indicator-down"]
        );
        assert!(host.root_data().is_some_and(|r| r.has_class(HOST_CLASS)));
    }

    #[test]
    fn no_indicator_marks_node() {
        let mut host = Element::new("Option", "div");
        Indicator::mixin(&mut host, IndicatorConfig::new()).unwrap();
        let node = node_of(&host);
        assert!(classes(&host, node).contains(&NO_INDICATOR_CLASS.to_owned()));
        assert!(host.root_data().is_some_and(|r| !r.has_class(HOST_CLASS)));
    }

    #[test]
    fn set_indicator_swaps_classes_and_trims() {
        let mut host = Element::new("Option", "div");
        Indicator::mixin(&mut host, IndicatorConfig::new().with_default_indicator("down")).unwrap();
        host.invoke("set_indicator", &["  up ".into()]).unwrap();
        let node = node_of(&host);
        let cls = classes(&host, node);
        assert!(cls.contains(&"ui-indicator-up".to_owned()));
        assert!(!cls.contains(&"ui-indicator-down".to_owned()));
        assert_eq!(host.invoke("get_indicator", &[]), Ok("up".into()));

        host.invoke("set_indicator", &["   ".into()]).unwrap();
        assert_eq!(host.invoke("get_indicator", &[]), Ok(Value::Null));
        assert!(classes(&host, node).contains(&NO_INDICATOR_CLASS.to_owned()));
    }

    #[test]
    fn retarget_cleans_old_node() {
        let mut host = Element::new("Option", "div");
        Indicator::mixin(
            &mut host,
            IndicatorConfig::new()
                .with_indicator("required")
                .with_indicator_title("Required"),
        )
        .unwrap();
        let old = node_of(&host);
        let fresh = host.create_node(NodeData::new("span"));
        host.invoke("set_indicator_element", &[fresh.into()]).unwrap();
        assert!(classes(&host, old).is_empty());
        assert_eq!(host.dom().get(old).and_then(|n| n.attr("title")), None);
        assert!(classes(&host, fresh).contains(&"ui-indicator-required".to_owned()));
        assert_eq!(host.dom().get(fresh).and_then(|n| n.attr("title")), Some("Required"));
        assert_eq!(host.delegated_property("indicator"), Ok(fresh));
    }

    struct CountingTheme(Rc<Cell<usize>>);

    impl Theme for CountingTheme {
        fn update_element_classes(&self, _: &mut Element) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn theme_consulted_on_changes() {
        let calls = Rc::new(Cell::new(0));
        let mut host =
            Element::new("Option", "div").with_theme(Rc::new(CountingTheme(calls.clone())));
        Indicator::mixin(&mut host, IndicatorConfig::new().with_indicator("down")).unwrap();
        assert_eq!(calls.get(), 2);
        host.invoke("set_indicator", &["up".into()]).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn flag_aware_theme_inverts_primary() {
        let mut host = Element::new("Option", "div").with_theme(Rc::new(FlagAwareTheme));
        let root = host.root();
        host.update_node(root, |n| n.add_class("ui-flaggedElement-primary"));
        Indicator::mixin(&mut host, IndicatorConfig::new().with_indicator("down")).unwrap();
        let node = node_of(&host);
        assert!(classes(&host, node).contains(&FlagAwareTheme::INVERT_CLASS.to_owned()));
    }
}
