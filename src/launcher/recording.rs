//! Launcher that records invocations instead of spawning them.
//!
//! Backs `--dry-run` and stands in for the real launcher in tests.

use super::invocation::{ExitResult, Invocation};
use super::ProcessLauncher;
use crate::error::RunError;
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Debug)]
pub struct RecordingLauncher {
    exit: ExitResult,
    invocations: Mutex<Vec<Invocation>>,
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLauncher {
    /// Records and reports success.
    pub fn new() -> Self {
        Self::with_exit(ExitResult::SUCCESS)
    }

    /// Records and reports the given exit code for every launch.
    pub fn with_exit(exit: ExitResult) -> Self {
        Self {
            exit,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    pub fn last(&self) -> Option<Invocation> {
        self.invocations.lock().last().cloned()
    }

    pub fn launch_count(&self) -> usize {
        self.invocations.lock().len()
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn launch(&self, invocation: &Invocation) -> Result<ExitResult, RunError> {
        self.invocations.lock().push(invocation.clone());
        Ok(self.exit)
    }
}
