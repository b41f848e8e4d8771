//! Step descriptors: a callable bound to its context.

use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::mixin::MixinError;

/// Future returned by asynchronous steps.
pub type StepFuture = LocalBoxFuture<'static, Result<(), StepError>>;

/// Failure of a single step, synchronous or asynchronous.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StepError {
    message: String,
}

impl StepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<MixinError> for StepError {
    fn from(err: MixinError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Clone)]
enum StepKind {
    Sync(Rc<dyn Fn() -> Result<(), StepError>>),
    Async(Rc<dyn Fn() -> StepFuture>),
    Delay(Duration),
}

/// One entry of a [`Process`](super::Process).
///
/// The context is captured by value when the step is built and handed to the
/// callable every time the step runs, so a step can be replayed.
#[derive(Clone)]
pub struct Step {
    kind: StepKind,
    label: Option<&'static str>,
}

impl Step {
    /// A synchronous step run against `context`.
    pub fn sync<C, F>(context: C, f: F) -> Self
    where
        C: 'static,
        F: Fn(&C) -> Result<(), StepError> + 'static,
    {
        Self::from_kind(StepKind::Sync(Rc::new(move || f(&context))))
    }

    /// A synchronous step with statically bound arguments.
    pub fn sync_with<C, A, F>(context: C, args: A, f: F) -> Self
    where
        C: 'static,
        A: 'static,
        F: Fn(&C, &A) -> Result<(), StepError> + 'static,
    {
        Self::from_kind(StepKind::Sync(Rc::new(move || f(&context, &args))))
    }

    /// An asynchronous step. Each run receives a clone of `context`.
    pub fn task<C, F, Fut>(context: C, f: F) -> Self
    where
        C: Clone + 'static,
        F: Fn(C) -> Fut + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        Self::from_kind(StepKind::Async(Rc::new(move || f(context.clone()).boxed_local())))
    }

    /// A step that waits for `duration` and then succeeds.
    pub fn delay(duration: Duration) -> Self {
        Self::from_kind(StepKind::Delay(duration))
    }

    /// Attach a label used in diagnostics (builder).
    pub fn named(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    /// Whether running this step suspends the pipeline.
    pub fn is_async(&self) -> bool {
        !matches!(self.kind, StepKind::Sync(_))
    }

    pub(crate) async fn run(&self) -> Result<(), StepError> {
        match &self.kind {
            StepKind::Sync(f) => f(),
            StepKind::Async(f) => f().await,
            StepKind::Delay(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(())
            }
        }
    }

    fn from_kind(kind: StepKind) -> Self {
        Self { kind, label: None }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            StepKind::Sync(_) => "sync".to_owned(),
            StepKind::Async(_) => "async".to_owned(),
            StepKind::Delay(d) => format!("delay({d:?})"),
        };
        f.debug_struct("Step")
            .field("kind", &kind)
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn sync_step_sees_context() {
        let hits = Rc::new(Cell::new(0));
        let step = Step::sync(hits.clone(), |h| {
            h.set(h.get() + 1);
            Ok(())
        });
        assert!(!step.is_async());
        step.run().await.unwrap();
        step.run().await.unwrap();
        assert_eq!(hits.get(), 2);
    }

    #[tokio::test]
    async fn sync_with_passes_args() {
        let seen = Rc::new(Cell::new(0));
        let step = Step::sync_with(seen.clone(), 41, |s, n| {
            s.set(*n + 1);
            Ok(())
        });
        step.run().await.unwrap();
        assert_eq!(seen.get(), 42);
    }

    #[tokio::test]
    async fn task_step_is_async() {
        let step = Step::task((), |_| async { Err::<(), _>(StepError::new("nope")) });
        assert!(step.is_async());
        assert_eq!(step.run().await, Err(StepError::new("nope")));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_step_waits() {
        let start = tokio::time::Instant::now();
        Step::delay(Duration::from_millis(250)).run().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[test]
    fn debug_shows_kind_and_label() {
        let step = Step::sync((), |_| Ok(())).named("init");
        assert_eq!(
            format!("{step:?}"),
            "Step { kind: \"sync\", label: Some(\"init\") }"
        );
    }

    #[test]
    fn mixin_error_converts() {
        let err: StepError = MixinError::PropertyNotFound("x".into()).into();
        assert_eq!(err.message(), "undefined property: x");
    }
}
