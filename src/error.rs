//! Error types for workspace loading, dispatch, and subprocess launch.

use thiserror::Error;

/// Errors surfaced by a single `taskrun` invocation.
///
/// Every variant is terminal for the current invocation: nothing is retried, and the
/// binary maps any of them to a message on stderr and a non-zero exit code.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to load workspace: {0}")]
    WorkspaceLoad(String),

    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error("Script '{0}' specifies both 'file' and 'command'; use only one")]
    FileAndCommandSpecified(String),

    #[error("Script '{0}' must specify either 'file' or 'command'")]
    MissingFileOrCommand(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Program not found: {0}")]
    ProgramNotFound(String),

    #[error("Failed to start process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for RunError {
    fn from(err: config::ConfigError) -> Self {
        RunError::Config(err.to_string())
    }
}

impl RunError {
    /// Remediation hint printed under the error message, if one applies.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            RunError::PermissionDenied(_) => Some(
                "Check that the runtime or command is executable, or reinstall taskrun with the correct permissions.",
            ),
            RunError::ProgramNotFound(_) => {
                Some("Install the runtime or set it with --runtime / TASKRUN__RUNTIME__PROGRAM.")
            }
            RunError::WorkspaceLoad(_) => Some(
                "Create a taskrun-workspace.yml (or .yaml, .json, .toml) in the workspace directory.",
            ),
            _ => None,
        }
    }
}
