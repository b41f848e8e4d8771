//! Key input and bindings.

pub mod binding;
pub mod input;

pub use binding::{BindingAction, KeyBindingRegistry};
pub use input::{Key, KeyEvent, Modifiers};
