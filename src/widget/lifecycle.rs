//! Dialog lifecycle: the open/close state machine.
//!
//! [`LifecycleTracker`] owns the current [`LifecycleState`], rejects illegal
//! transitions, and queues a [`LifecycleEvent`] for every accepted one so the
//! caller can drain and react to them.

use std::fmt;

use crate::process::{ProcessError, StepError};

/// Where a dialog is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        })
    }
}

/// A requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Open,
    Close,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Close => "close",
        })
    }
}

/// Errors surfaced by the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {attempted} a dialog that is {from}")]
    InvalidTransition {
        from: LifecycleState,
        attempted: Transition,
    },
    #[error("dialog failed to open: {source}")]
    OpenFailed {
        #[source]
        source: ProcessError,
    },
    #[error("action {action:?} failed: {source}")]
    ActionFailed {
        action: String,
        #[source]
        source: ProcessError,
    },
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl From<LifecycleError> for StepError {
    fn from(err: LifecycleError) -> Self {
        StepError::new(err.to_string())
    }
}

/// Transition record, queued in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Opening,
    Opened,
    OpenFailed,
    Closing,
    Closed,
}

#[derive(Debug, Default)]
pub struct LifecycleTracker {
    state: LifecycleState,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// `Closed` -> `Opening`.
    pub fn begin_open(&mut self) -> Result<(), LifecycleError> {
        self.advance(
            Transition::Open,
            LifecycleState::Closed,
            LifecycleState::Opening,
            LifecycleEvent::Opening,
        )
    }

    /// `Opening` -> `Open`.
    pub fn finish_open(&mut self) -> Result<(), LifecycleError> {
        self.advance(
            Transition::Open,
            LifecycleState::Opening,
            LifecycleState::Open,
            LifecycleEvent::Opened,
        )
    }

    /// `Opening` -> `Closed`, after a failed setup or ready phase.
    pub fn abort_open(&mut self) -> Result<(), LifecycleError> {
        self.advance(
            Transition::Open,
            LifecycleState::Opening,
            LifecycleState::Closed,
            LifecycleEvent::OpenFailed,
        )
    }

    /// `Open` -> `Closing`.
    pub fn begin_close(&mut self) -> Result<(), LifecycleError> {
        self.advance(
            Transition::Close,
            LifecycleState::Open,
            LifecycleState::Closing,
            LifecycleEvent::Closing,
        )
    }

    /// `Closing` -> `Closed`.
    pub fn finish_close(&mut self) -> Result<(), LifecycleError> {
        self.advance(
            Transition::Close,
            LifecycleState::Closing,
            LifecycleState::Closed,
            LifecycleEvent::Closed,
        )
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn advance(
        &mut self,
        attempted: Transition,
        from: LifecycleState,
        to: LifecycleState,
        event: LifecycleEvent,
    ) -> Result<(), LifecycleError> {
        if self.state != from {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                attempted,
            });
        }
        self.state = to;
        self.pending.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_quiet() {
        let tracker = LifecycleTracker::new();
        assert_eq!(tracker.state(), LifecycleState::Closed);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn full_cycle_events() {
        let mut tracker = LifecycleTracker::new();
        tracker.begin_open().unwrap();
        tracker.finish_open().unwrap();
        tracker.begin_close().unwrap();
        tracker.finish_close().unwrap();
        assert_eq!(
            tracker.pending_events(),
            vec![
                LifecycleEvent::Opening,
                LifecycleEvent::Opened,
                LifecycleEvent::Closing,
                LifecycleEvent::Closed,
            ]
        );
        assert!(tracker.pending_events().is_empty());
    }

    #[test]
    fn close_while_closed_rejected() {
        let mut tracker = LifecycleTracker::new();
        let err = tracker.begin_close().unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: LifecycleState::Closed,
                attempted: Transition::Close,
            }
        );
        assert_eq!(err.to_string(), "cannot close a dialog that is closed");
        assert_eq!(tracker.state(), LifecycleState::Closed);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn open_while_opening_rejected() {
        let mut tracker = LifecycleTracker::new();
        tracker.begin_open().unwrap();
        assert!(matches!(
            tracker.begin_open(),
            Err(LifecycleError::InvalidTransition { from: LifecycleState::Opening, .. })
        ));
        assert!(tracker.begin_close().is_err());
        assert_eq!(tracker.state(), LifecycleState::Opening);
    }

    #[test]
    fn abort_returns_to_closed() {
        let mut tracker = LifecycleTracker::new();
        tracker.begin_open().unwrap();
        tracker.abort_open().unwrap();
        assert_eq!(tracker.state(), LifecycleState::Closed);
        assert_eq!(
            tracker.pending_events(),
            vec![LifecycleEvent::Opening, LifecycleEvent::OpenFailed]
        );
    }
}
