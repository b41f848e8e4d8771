//! Step pipelines for sequenced behaviour.

#[allow(clippy::module_inception)]
pub mod process;
pub mod step;

pub use process::{Process, ProcessError};
pub use step::{Step, StepError, StepFuture};
