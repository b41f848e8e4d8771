//! Test helpers: textual element outlines.
//!
//! Use [`outline`] to capture an element tree as plain text for snapshot-style
//! assertions.

pub mod outline;

pub use outline::{dialog_outline, outline, outline_from};
