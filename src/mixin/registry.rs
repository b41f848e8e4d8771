//! Capability traits, dispatch tables and the ordered registry.
//!
//! A capability type implements [`CapabilityType`]: it names itself, declares
//! at most one delegated property, and publishes an explicit table of
//! [`Method`]s. The object-safe [`Capability`] trait is implemented for every
//! `CapabilityType` so hosts can store heterogeneous capabilities in one
//! [`Mixins`] list. Resolution always walks that list in attachment order.

use std::any::Any;

use super::element::Element;
use super::value::Value;
use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced by capability resolution and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixinError {
    /// No host method and no attached capability defines the method.
    #[error("call to undefined method {host}::{method}()")]
    MethodNotFound { host: String, method: String },
    /// No attached capability delegates the property.
    #[error("undefined property: {0}")]
    PropertyNotFound(String),
    /// A dispatched method received arguments it cannot use.
    #[error("invalid argument for {method}: {reason}")]
    InvalidArgument { method: &'static str, reason: String },
    /// The slot a method was dispatched to holds a different capability type.
    #[error("capability slot {index} is not a {expected}")]
    CapabilityMismatch { index: usize, expected: &'static str },
}

// ---------------------------------------------------------------------------
// Method table
// ---------------------------------------------------------------------------

/// Signature of a dispatched capability method.
///
/// The `usize` is the slot of the answering capability in the host's
/// registry, used by the method to reach its own state through
/// [`Element::slot_mut`].
pub type MethodFn = fn(&mut Element, usize, &[Value]) -> Result<Value, MixinError>;

/// One entry in a capability's dispatch table.
#[derive(Clone, Copy)]
pub struct Method {
    pub name: &'static str,
    pub call: MethodFn,
}

impl Method {
    pub const fn new(name: &'static str, call: MethodFn) -> Self {
        Self { name, call }
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method").field("name", &self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// CapabilityType / Capability
// ---------------------------------------------------------------------------

/// Static description of a capability type.
pub trait CapabilityType: Any {
    /// Human-readable name used in diagnostics and [`Mixins::kinds`].
    const KIND: &'static str;

    /// The single property name this capability offers for delegation, if any.
    const TARGET_PROPERTY: Option<&'static str> = None;

    /// Explicit dispatch table.
    const METHODS: &'static [Method];

    /// The node served for [`TARGET_PROPERTY`](Self::TARGET_PROPERTY).
    fn target(&self) -> Option<NodeId> {
        None
    }
}

/// Object-safe view of an attached capability.
pub trait Capability: Any {
    fn kind(&self) -> &'static str;
    fn methods(&self) -> &'static [Method];
    fn target_property(&self) -> Option<&'static str>;
    fn target(&self) -> Option<NodeId>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Look up a method in this capability's table.
    fn method(&self, name: &str) -> Option<MethodFn> {
        self.methods().iter().find(|m| m.name == name).map(|m| m.call)
    }
}

impl<T: CapabilityType> Capability for T {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn methods(&self) -> &'static [Method] {
        T::METHODS
    }

    fn target_property(&self) -> Option<&'static str> {
        T::TARGET_PROPERTY
    }

    fn target(&self) -> Option<NodeId> {
        CapabilityType::target(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// Mixins
// ---------------------------------------------------------------------------

/// Ordered list of capabilities attached to one host.
///
/// Mutated only while the host is being constructed. Duplicate attachment is
/// not checked.
#[derive(Default)]
pub struct Mixins {
    entries: Vec<Box<dyn Capability>>,
}

impl Mixins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a capability and return its slot.
    pub fn attach(&mut self, capability: Box<dyn Capability>) -> usize {
        self.entries.push(capability);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capability kinds in resolution order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.entries.iter().map(|c| c.kind()).collect()
    }

    /// First capability (by attachment order) defining `method`.
    pub fn resolve(&self, method: &str) -> Option<(usize, MethodFn)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, cap)| cap.method(method).map(|call| (index, call)))
    }

    /// Whether any attached capability defines `method`.
    pub fn defines(&self, method: &str) -> bool {
        self.resolve(method).is_some()
    }

    /// Target of the first capability whose declared property is `name`.
    pub fn delegated_property(&self, name: &str) -> Result<NodeId, MixinError> {
        self.entries
            .iter()
            .find(|cap| cap.target_property() == Some(name))
            .and_then(|cap| cap.target())
            .ok_or_else(|| MixinError::PropertyNotFound(name.to_owned()))
    }

    /// Typed access to the capability in `index`.
    pub fn slot<T: CapabilityType>(&self, index: usize) -> Result<&T, MixinError> {
        self.entries
            .get(index)
            .and_then(|cap| cap.as_any().downcast_ref::<T>())
            .ok_or(MixinError::CapabilityMismatch {
                index,
                expected: T::KIND,
            })
    }

    /// Typed mutable access to the capability in `index`.
    pub fn slot_mut<T: CapabilityType>(&mut self, index: usize) -> Result<&mut T, MixinError> {
        self.entries
            .get_mut(index)
            .and_then(|cap| cap.as_any_mut().downcast_mut::<T>())
            .ok_or(MixinError::CapabilityMismatch {
                index,
                expected: T::KIND,
            })
    }

    /// First attached capability of type `T`.
    pub fn find<T: CapabilityType>(&self) -> Option<&T> {
        self.entries
            .iter()
            .find_map(|cap| cap.as_any().downcast_ref::<T>())
    }

    /// First attached capability of type `T`, mutably.
    pub fn find_mut<T: CapabilityType>(&mut self) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find_map(|cap| cap.as_any_mut().downcast_mut::<T>())
    }
}

impl std::fmt::Debug for Mixins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.kinds()).finish()
    }
}
