//! Component trait and the dialog lifecycle state machine.

pub mod lifecycle;
pub mod traits;

pub use lifecycle::{LifecycleError, LifecycleEvent, LifecycleState, LifecycleTracker, Transition};
pub use traits::{Component, ComponentExt};
