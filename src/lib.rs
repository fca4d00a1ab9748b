//! Taskrun: Workspace Script Runner
//!
//! Reads a workspace file of named scripts, resolves the runtime options that apply to
//! the requested script, launches it as a subprocess, and hands back its exit code.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod options;
pub mod runner;
pub mod tooling;
pub mod upgrade;
pub mod workspace;

pub use error::RunError;
pub use launcher::{ExitResult, Invocation, ProcessLauncher};
pub use runner::{run, RunRequest, Runner};
