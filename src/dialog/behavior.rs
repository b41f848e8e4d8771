//! Hooks for extending a dialog's phase processes.

use super::config::{CloseData, OpenData};
use super::dialog::Dialog;
use crate::process::{Process, ProcessError};

/// Extends the processes a [`Dialog`] runs for each phase.
///
/// Every hook receives the base process, already holding the dialog's own
/// steps, and may add steps with [`Process::first`] or [`Process::next`].
/// Defaults leave the base process untouched.
///
/// Behaviours are owned by the dialog; capture a [`Dialog`] only inside the
/// steps they build, never in the behaviour itself.
pub trait DialogBehavior {
    fn setup_process(
        &self,
        _dialog: &Dialog,
        _data: &OpenData,
        _process: &mut Process,
    ) -> Result<(), ProcessError> {
        Ok(())
    }

    fn ready_process(
        &self,
        _dialog: &Dialog,
        _data: &OpenData,
        _process: &mut Process,
    ) -> Result<(), ProcessError> {
        Ok(())
    }

    fn hold_process(
        &self,
        _dialog: &Dialog,
        _data: &CloseData,
        _process: &mut Process,
    ) -> Result<(), ProcessError> {
        Ok(())
    }

    fn teardown_process(
        &self,
        _dialog: &Dialog,
        _data: &CloseData,
        _process: &mut Process,
    ) -> Result<(), ProcessError> {
        Ok(())
    }

    fn action_process(
        &self,
        _dialog: &Dialog,
        _action: &str,
        _process: &mut Process,
    ) -> Result<(), ProcessError> {
        Ok(())
    }
}

/// Runs only the dialog's own steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBehavior;

impl DialogBehavior for DefaultBehavior {}
