//! Theme hook, injected into elements instead of read from global state.

use super::element::Element;

/// Collaborator that adjusts theme-dependent classes after a capability
/// changes an element.
pub trait Theme {
    fn update_element_classes(&self, element: &mut Element);
}

/// Inverts indicator imagery on elements flagged `primary` or `destructive`.
///
/// Reads the `indicator` delegated property, so it is a no-op for elements
/// without an indicator capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlagAwareTheme;

impl FlagAwareTheme {
    pub const INVERT_CLASS: &'static str = "ui-image-invert";
}

impl Theme for FlagAwareTheme {
    fn update_element_classes(&self, element: &mut Element) {
        let Some(indicator) = element.delegated_property_opt("indicator") else {
            return;
        };
        let invert = element.root_data().is_some_and(|root| {
            root.has_class("ui-flaggedElement-primary")
                || root.has_class("ui-flaggedElement-destructive")
        });
        element.update_node(indicator, |node| node.set_class(Self::INVERT_CLASS, invert));
    }
}
