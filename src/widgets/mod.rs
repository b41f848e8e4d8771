//! Built-in widgets: ActionWidget, ButtonOptionWidget, MultioptionWidget.

pub mod action;
pub mod button_option;
pub mod multioption;

pub use action::{ActionConfig, ActionWidget};
pub use button_option::{ButtonOptionConfig, ButtonOptionWidget};
pub use multioption::{MultioptionConfig, MultioptionWidget};

use crate::dom::NodeId;
use crate::mixin::{Element, MixinError};

/// Move the nodes behind the named delegated properties under `parent`, in
/// order. Capabilities create their nodes detached; the widget places them.
pub(crate) fn place_parts(
    element: &mut Element,
    parent: NodeId,
    properties: &[&str],
) -> Result<(), MixinError> {
    for property in properties {
        let node = element.delegated_property(property)?;
        element.dom_mut().append(parent, node);
    }
    Ok(())
}
