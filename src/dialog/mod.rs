//! Dialogs: lifecycle controller, actions, behaviour hooks.

pub mod actions;
pub mod behavior;
pub mod config;
#[allow(clippy::module_inception)]
pub mod dialog;

pub use actions::{ActionFilter, ActionSet};
pub use behavior::{DefaultBehavior, DialogBehavior};
pub use config::{CloseData, DialogConfig, OpenData};
pub use dialog::{CloseReport, Dialog};
