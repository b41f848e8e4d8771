//! The mixin host: an element tree plus its ordered capabilities.

use std::rc::Rc;

use tracing::{error, trace};

use super::registry::{CapabilityType, MixinError, Mixins};
use super::theme::Theme;
use super::value::Value;
use crate::dom::{Dom, NodeData, NodeId};

/// Host for capabilities.
///
/// Owns the element tree every attached capability decorates, the capability
/// registry, and an optionally injected [`Theme`]. Each capability instance
/// attached here belongs to this element alone.
pub struct Element {
    host: String,
    dom: Dom,
    root: NodeId,
    mixins: Mixins,
    theme: Option<Rc<dyn Theme>>,
}

impl Element {
    /// Create an element whose root node has the given tag. `host` names the
    /// owning component type in diagnostics.
    pub fn new(host: impl Into<String>, tag: &str) -> Self {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::new(tag));
        Self {
            host: host.into(),
            dom,
            root,
            mixins: Mixins::new(),
            theme: None,
        }
    }

    /// Inject the theme hook (builder).
    pub fn with_theme(mut self, theme: Rc<dyn Theme>) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Root node data.
    pub fn root_data(&self) -> Option<&NodeData> {
        self.dom.get(self.root)
    }

    /// Mutate a node if it exists. Returns whether the node was found.
    pub fn update_node(&mut self, id: NodeId, f: impl FnOnce(&mut NodeData)) -> bool {
        match self.dom.get_mut(id) {
            Some(node) => {
                f(node);
                true
            }
            None => false,
        }
    }

    /// Create a detached node in this element's tree.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.dom.insert(data)
    }

    /// The capability registry, read-only.
    pub fn mixins(&self) -> &Mixins {
        &self.mixins
    }

    /// Attach a capability and return its slot.
    ///
    /// This only registers the instance; capability initialisers call it
    /// before running their own setup against the host.
    pub fn attach<T: CapabilityType>(&mut self, capability: T) -> usize {
        let slot = self.mixins.attach(Box::new(capability));
        trace!(host = %self.host, kind = T::KIND, slot, "capability attached");
        slot
    }

    /// Invoke `method` on the first attached capability that defines it.
    pub fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, MixinError> {
        let Some((slot, call)) = self.mixins.resolve(method) else {
            error!(host = %self.host, method, "method not found on any capability");
            return Err(MixinError::MethodNotFound {
                host: self.host.clone(),
                method: method.to_owned(),
            });
        };
        call(self, slot, args)
    }

    /// Whether every method in `methods` resolves to an attached capability.
    pub fn supports(&self, methods: &[&str]) -> bool {
        methods.iter().all(|m| self.mixins.defines(m))
    }

    /// Target node delegated under `name`.
    pub fn delegated_property(&self, name: &str) -> Result<NodeId, MixinError> {
        self.mixins.delegated_property(name)
    }

    /// Like [`delegated_property`](Self::delegated_property) with the
    /// not-found case treated as absent.
    pub fn delegated_property_opt(&self, name: &str) -> Option<NodeId> {
        self.mixins.delegated_property(name).ok()
    }

    pub fn slot<T: CapabilityType>(&self, index: usize) -> Result<&T, MixinError> {
        self.mixins.slot(index)
    }

    pub fn slot_mut<T: CapabilityType>(&mut self, index: usize) -> Result<&mut T, MixinError> {
        self.mixins.slot_mut(index)
    }

    /// First attached capability of type `T`.
    pub fn capability<T: CapabilityType>(&self) -> Option<&T> {
        self.mixins.find()
    }

    pub fn capability_mut<T: CapabilityType>(&mut self) -> Option<&mut T> {
        self.mixins.find_mut()
    }

    /// Let the injected theme refresh theme-dependent classes.
    pub fn update_theme_classes(&mut self) {
        if let Some(theme) = self.theme.clone() {
            theme.update_element_classes(self);
        }
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("host", &self.host)
            .field("root", &self.root)
            .field("mixins", &self.mixins)
            .field("nodes", &self.dom.len())
            .finish()
    }
}
