//! Ordered, abortable step pipelines.

use std::cell::Cell;

use futures::future::{self, FutureExt, LocalBoxFuture};
use tracing::{debug, trace};

use super::step::{Step, StepError};

/// Errors produced by [`Process`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    /// Steps were added after `execute` had been called.
    #[error("process steps cannot change once execution has begun")]
    AlreadyExecuting,
    /// A single-use process was executed a second time.
    #[error("single-use process has already been executed")]
    Spent,
    /// A step failed; the remaining steps were skipped.
    #[error("step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: StepError,
    },
}

impl ProcessError {
    /// The failing step's error, if this is a step failure.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            Self::Step { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// An ordered list of steps executed one at a time.
///
/// Steps can be prepended with [`first`](Self::first) or appended with
/// [`next`](Self::next) until `execute` is first called; after that the list is
/// frozen. Executing runs the steps in order, awaiting each asynchronous step
/// before starting the next, and stops at the first failure.
#[derive(Debug, Clone, Default)]
pub struct Process {
    steps: Vec<Step>,
    started: Cell<bool>,
    single_use: bool,
}

impl Process {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a process from a list of steps.
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Allow at most one execution (builder).
    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    pub fn is_single_use(&self) -> bool {
        self.single_use
    }

    /// Whether `execute` has been called at least once.
    pub fn has_started(&self) -> bool {
        self.started.get()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Insert `step` before all existing steps.
    pub fn first(&mut self, step: Step) -> Result<&mut Self, ProcessError> {
        self.ensure_mutable()?;
        self.steps.insert(0, step);
        Ok(self)
    }

    /// Append `step` after all existing steps.
    pub fn next(&mut self, step: Step) -> Result<&mut Self, ProcessError> {
        self.ensure_mutable()?;
        self.steps.push(step);
        Ok(self)
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// The step list is frozen at the moment of this call. The returned future
    /// does not borrow the process, so it can be executed again while a
    /// previous run is still in flight (unless single-use).
    pub fn execute(&self) -> LocalBoxFuture<'static, Result<(), ProcessError>> {
        let Some(steps) = self.begin() else {
            return future::ready(Err(ProcessError::Spent)).boxed_local();
        };
        async move {
            for (index, step) in steps.iter().enumerate() {
                trace!(index, step = step.label().unwrap_or("-"), "running step");
                if let Err(source) = step.run().await {
                    debug!(
                        index,
                        step = step.label().unwrap_or("-"),
                        %source,
                        "step failed, aborting process"
                    );
                    return Err(ProcessError::Step { index, source });
                }
            }
            Ok(())
        }
        .boxed_local()
    }

    /// Run every step in order, continuing past failures.
    ///
    /// Returns the failures that occurred, in step order. Used where leaving
    /// work half done is worse than an incomplete run.
    pub fn execute_best_effort(&self) -> LocalBoxFuture<'static, Vec<ProcessError>> {
        let Some(steps) = self.begin() else {
            return future::ready(vec![ProcessError::Spent]).boxed_local();
        };
        async move {
            let mut failures = Vec::new();
            for (index, step) in steps.iter().enumerate() {
                trace!(index, step = step.label().unwrap_or("-"), "running step (best effort)");
                if let Err(source) = step.run().await {
                    failures.push(ProcessError::Step { index, source });
                }
            }
            failures
        }
        .boxed_local()
    }

    fn begin(&self) -> Option<Vec<Step>> {
        if self.single_use && self.started.get() {
            return None;
        }
        self.started.set(true);
        Some(self.steps.clone())
    }

    fn ensure_mutable(&self) -> Result<(), ProcessError> {
        if self.started.get() {
            Err(ProcessError::AlreadyExecuting)
        } else {
            Ok(())
        }
    }
}
