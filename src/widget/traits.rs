//! Component trait: a host type plus the capabilities attached to it.
//!
//! A component owns an [`Element`]. Calls made through [`Component::invoke`]
//! resolve against the component's own methods first and fall back to the
//! element's capabilities in attachment order. `ComponentExt` adds builder
//! helpers for root classes.

use std::any::Any;

use crate::dom::NodeId;
use crate::mixin::{Element, MixinError, Value};

/// Core trait implemented by every capability host.
///
/// Object-safe: builder helpers needing `Self: Sized` live on [`ComponentExt`].
pub trait Component {
    /// Type name used in diagnostics (e.g. `"ActionWidget"`).
    fn widget_type(&self) -> &str;

    fn element(&self) -> &Element;

    fn element_mut(&mut self) -> &mut Element;

    /// Methods the component type itself defines. These shadow capability
    /// methods of the same name for calls made through [`Component::invoke`].
    ///
    /// Capabilities calling one another (for example `update_title` asking for
    /// `format_title_with_access_key`) dispatch through the [`Element`], which
    /// does not know its component, so an own method never replaces a
    /// capability method on that path. To change what a sibling sees, attach a
    /// capability defining the method ahead of the one it should shadow.
    fn own_methods(&self) -> &'static [&'static str] {
        &[]
    }

    /// Run one of [`own_methods`](Self::own_methods). `None` means the name is
    /// not an own method.
    fn call_own(&mut self, _method: &str, _args: &[Value]) -> Option<Result<Value, MixinError>> {
        None
    }

    /// Resolve `method` on the component, then on its capabilities.
    fn invoke(&mut self, method: &str, args: &[Value]) -> Result<Value, MixinError> {
        if let Some(result) = self.call_own(method, args) {
            return result;
        }
        self.element_mut().invoke(method, args)
    }

    /// Whether every named method resolves on the component or a capability.
    fn supports(&self, methods: &[&str]) -> bool {
        let own = self.own_methods();
        methods
            .iter()
            .all(|m| own.contains(m) || self.element().supports(&[m]))
    }

    fn delegated_property(&self, name: &str) -> Result<NodeId, MixinError> {
        self.element().delegated_property(name)
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Builder-style helpers, implemented for every [`Component`].
pub trait ComponentExt: Component {
    /// Add a class to the root node (chainable).
    fn with_class(mut self, class: &str) -> Self
    where
        Self: Sized,
    {
        let root = self.element().root();
        self.element_mut().update_node(root, |n| n.add_class(class));
        self
    }

    fn with_classes(mut self, classes: &[&str]) -> Self
    where
        Self: Sized,
    {
        let root = self.element().root();
        self.element_mut().update_node(root, |n| {
            for class in classes {
                n.add_class(class);
            }
        });
        self
    }
}

impl<T: Component> ComponentExt for T {}
