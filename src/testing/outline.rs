//! Textual dumps of element trees for snapshot-style assertions.
//!
//! Each node becomes one line: tag, `.class` list, attributes in name order,
//! then quoted text. Children are indented two spaces under their parent.
//! Only nodes reachable from the root are listed.

use std::fmt::Write as _;

use crate::dialog::Dialog;
use crate::dom::{Dom, NodeId};
use crate::mixin::Element;

/// Outline of `element`, starting at its root.
pub fn outline(element: &Element) -> String {
    outline_from(element.dom(), element.root())
}

/// Outline of the subtree under `start`.
pub fn outline_from(dom: &Dom, start: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, start, 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// Outline of a dialog's window followed by its title widget.
pub fn dialog_outline(dialog: &Dialog) -> String {
    let window = dialog.with_element(outline);
    let title = dialog.with_title_element(outline);
    format!("{window}\n--- title\n{title}")
}

fn write_node(dom: &Dom, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.tag);
    for class in &node.classes {
        out.push('.');
        out.push_str(class);
    }
    for (name, value) in &node.attributes {
        let _ = write!(out, " {name}={value:?}");
    }
    if let Some(text) = &node.text {
        let _ = write!(out, " {text:?}");
    }
    out.push('\n');
    for &child in dom.children(id) {
        write_node(dom, child, depth + 1, out);
    }
}
