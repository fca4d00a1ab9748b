//! Tooling & Integration Layer
//!
//! Command-line entry points over the runner, dispatch and workspace modules.

pub mod cli;

pub use cli::{
    exit_code, format_invocation, Cli, CliContext, CommandOutcome, Commands, ERROR_EXIT_CODE,
};
