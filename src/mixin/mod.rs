//! Capability composition: registry, host element, values, theme hook.

pub mod element;
pub mod registry;
pub mod theme;
pub mod value;

pub use element::Element;
pub use registry::{Capability, CapabilityType, Method, MethodFn, MixinError, Mixins};
pub use theme::{FlagAwareTheme, Theme};
pub use value::{resolve_text, TextSource, Value};
