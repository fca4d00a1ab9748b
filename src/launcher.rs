//! Subprocess launch: one child per invocation, exit code handed back to the caller.

mod invocation;
mod process;
mod recording;

pub use invocation::{ExitResult, Invocation};
pub use process::SystemLauncher;
pub use recording::RecordingLauncher;

use crate::error::RunError;
use async_trait::async_trait;

/// Starts a process for an [`Invocation`] and waits for it to terminate.
///
/// Implementations never retry; a spawn failure is returned as-is.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, invocation: &Invocation) -> Result<ExitResult, RunError>;
}
