//! Label capability: visible text content on a label node.

use super::{node_arg, text_arg};
use crate::dom::{NodeData, NodeId};
use crate::mixin::{resolve_text, CapabilityType, Element, Method, MixinError, TextSource, Value};

const LABEL_CLASS: &str = "ui-labelElement-label";
const HOST_CLASS: &str = "ui-labelElement";

/// Options for [`Labelled::mixin`].
#[derive(Debug, Clone, Default)]
pub struct LabelConfig {
    pub label: Option<TextSource>,
    /// Node holding the text. A fresh detached `span` is created when omitted.
    pub label_node: Option<NodeId>,
}

impl LabelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<TextSource>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_label_node(mut self, node: NodeId) -> Self {
        self.label_node = Some(node);
        self
    }
}

#[derive(Debug, Default)]
pub struct Labelled {
    node: Option<NodeId>,
    label: Option<String>,
}

impl Labelled {
    pub fn mixin(host: &mut Element, config: LabelConfig) -> Result<usize, MixinError> {
        let slot = host.attach(Labelled::default());
        let node = match config.label_node {
            Some(node) => node,
            None => host.create_node(NodeData::new("span")),
        };
        Self::set_label_element_in(host, slot, node)?;
        Self::set_label_in(host, slot, resolve_text(config.label.as_ref()))?;
        Ok(slot)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_label_in(
        host: &mut Element,
        slot: usize,
        label: Option<String>,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        me.label = label.clone();
        let node = me.node;
        let has = label.is_some();
        if let Some(node) = node {
            host.update_node(node, |n| n.text = label);
        }
        let root = host.root();
        host.update_node(root, |n| n.set_class(HOST_CLASS, has));
        Ok(())
    }

    fn set_label_element_in(
        host: &mut Element,
        slot: usize,
        node: NodeId,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        let previous = me.node.replace(node);
        let label = me.label.clone();
        if let Some(old) = previous {
            host.update_node(old, |n| {
                n.remove_class(LABEL_CLASS);
                n.text = None;
            });
        }
        host.update_node(node, |n| {
            n.add_class(LABEL_CLASS);
            n.text = label;
        });
        Ok(())
    }

    fn call_set_label(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let label = text_arg("set_label", args)?;
        Self::set_label_in(host, slot, label)?;
        Ok(Value::Null)
    }

    fn call_get_label(host: &mut Element, slot: usize, _: &[Value]) -> Result<Value, MixinError> {
        Ok(host.slot::<Self>(slot)?.label.clone().into())
    }

    fn call_set_label_element(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let node = node_arg("set_label_element", args)?;
        Self::set_label_element_in(host, slot, node)?;
        Ok(Value::Null)
    }
}

impl CapabilityType for Labelled {
    const KIND: &'static str = "Labelled";
    const TARGET_PROPERTY: Option<&'static str> = Some("label");
    const METHODS: &'static [Method] = &[
        Method::new("set_label", Self::call_set_label),
        Method::new("get_label", Self::call_get_label),
        Method::new("set_label_element", Self::call_set_label_element),
    ];

    fn target(&self) -> Option<NodeId> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_text_on_node() {
        let mut host = Element::new("Option", "div");
        Labelled::mixin(&mut host, LabelConfig::new().with_label("Apples")).unwrap();
        let node = host.delegated_property("label").unwrap();
        let data = host.dom().get(node).unwrap();
        assert_eq!(data.text.as_deref(), Some("Apples"));
        assert!(data.has_class(LABEL_CLASS));
        assert!(host.root_data().is_some_and(|r| r.has_class(HOST_CLASS)));
    }

    #[test]
    fn clearing_label_drops_host_class() {
        let mut host = Element::new("Option", "div");
        Labelled::mixin(&mut host, LabelConfig::new().with_label("x")).unwrap();
        host.invoke("set_label", &[Value::Null]).unwrap();
        assert_eq!(host.invoke("get_label", &[]), Ok(Value::Null));
        assert!(host.root_data().is_some_and(|r| !r.has_class(HOST_CLASS)));
    }

    #[test]
    fn retarget_moves_text() {
        let mut host = Element::new("Option", "div");
        Labelled::mixin(&mut host, LabelConfig::new().with_label("x")).unwrap();
        let old = host.delegated_property("label").unwrap();
        let fresh = host.create_node(NodeData::new("strong"));
        host.invoke("set_label_element", &[fresh.into()]).unwrap();
        assert_eq!(host.dom().get(old).and_then(|n| n.text.clone()), None);
        assert_eq!(host.dom().get(fresh).and_then(|n| n.text.clone()).as_deref(), Some("x"));
    }
}
