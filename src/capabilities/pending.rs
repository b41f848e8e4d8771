//! Pending capability: a re-entrant busy counter.
//!
//! While the counter is non-zero the pending node carries
//! `ui-pendingElement-pending`. Pops never take the counter below zero.

use super::node_arg;
use crate::dom::NodeId;
use crate::mixin::{CapabilityType, Element, Method, MixinError, Value};

const PENDING_CLASS: &str = "ui-pendingElement-pending";

#[derive(Debug, Default)]
pub struct Pending {
    node: Option<NodeId>,
    pending: usize,
}

impl Pending {
    /// Attach to `host`, marking `node` (the host root when `None`).
    pub fn mixin(host: &mut Element, node: Option<NodeId>) -> Result<usize, MixinError> {
        let slot = host.attach(Pending::default());
        let node = node.unwrap_or(host.root());
        Self::set_pending_element_in(host, slot, node)?;
        Ok(slot)
    }

    pub fn count(&self) -> usize {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending > 0
    }

    fn set_pending_element_in(
        host: &mut Element,
        slot: usize,
        node: NodeId,
    ) -> Result<(), MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        let previous = me.node.replace(node);
        let active = me.pending > 0;
        if let Some(old) = previous {
            host.update_node(old, |n| n.remove_class(PENDING_CLASS));
        }
        host.update_node(node, |n| n.set_class(PENDING_CLASS, active));
        Ok(())
    }

    fn call_push(host: &mut Element, slot: usize, _: &[Value]) -> Result<Value, MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        me.pending += 1;
        let (count, node) = (me.pending, me.node);
        if let (1, Some(node)) = (count, node) {
            host.update_node(node, |n| n.add_class(PENDING_CLASS));
        }
        Ok(count.into())
    }

    fn call_pop(host: &mut Element, slot: usize, _: &[Value]) -> Result<Value, MixinError> {
        let me = host.slot_mut::<Self>(slot)?;
        me.pending = me.pending.saturating_sub(1);
        let (count, node) = (me.pending, me.node);
        if let (0, Some(node)) = (count, node) {
            host.update_node(node, |n| n.remove_class(PENDING_CLASS));
        }
        Ok(count.into())
    }

    fn call_is_pending(host: &mut Element, slot: usize, _: &[Value]) -> Result<Value, MixinError> {
        Ok(host.slot::<Self>(slot)?.is_pending().into())
    }

    fn call_set_pending_element(
        host: &mut Element,
        slot: usize,
        args: &[Value],
    ) -> Result<Value, MixinError> {
        let node = node_arg("set_pending_element", args)?;
        Self::set_pending_element_in(host, slot, node)?;
        Ok(Value::Null)
    }
}

impl CapabilityType for Pending {
    const KIND: &'static str = "Pending";
    const TARGET_PROPERTY: Option<&'static str> = Some("pending");
    const METHODS: &'static [Method] = &[
        Method::new("push_pending", Self::call_push),
        Method::new("pop_pending", Self::call_pop),
        Method::new("is_pending", Self::call_is_pending),
        Method::new("set_pending_element", Self::call_set_pending_element),
    ];

    fn target(&self) -> Option<NodeId> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    fn marked(host: &Element, node: NodeId) -> bool {
        host.dom().get(node).is_some_and(|n| n.has_class(PENDING_CLASS))
    }

    #[test]
    fn nested_push_pop() {
        let mut host = Element::new("Dialog", "div");
        Pending::mixin(&mut host, None).unwrap();
        let root = host.root();
        assert_eq!(host.invoke("push_pending", &[]), Ok(Value::Int(1)));
        assert_eq!(host.invoke("push_pending", &[]), Ok(Value::Int(2)));
        assert!(marked(&host, root));
        assert_eq!(host.invoke("pop_pending", &[]), Ok(Value::Int(1)));
        assert!(marked(&host, root));
        assert_eq!(host.invoke("pop_pending", &[]), Ok(Value::Int(0)));
        assert!(!marked(&host, root));
        assert_eq!(host.invoke("is_pending", &[]), Ok(Value::Bool(false)));
    }

    #[test]
    fn pop_floors_at_zero() {
        let mut host = Element::new("Dialog", "div");
        Pending::mixin(&mut host, None).unwrap();
        assert_eq!(host.invoke("pop_pending", &[]), Ok(Value::Int(0)));
        assert_eq!(host.capability::<Pending>().map(Pending::count), Some(0));
    }

    #[test]
    fn retarget_while_pending_moves_mark() {
        let mut host = Element::new("Dialog", "div");
        let head = host.create_node(NodeData::new("div"));
        Pending::mixin(&mut host, None).unwrap();
        host.invoke("push_pending", &[]).unwrap();
        host.invoke("set_pending_element", &[head.into()]).unwrap();
        assert!(!marked(&host, host.root()));
        assert!(marked(&host, head));
    }
}
