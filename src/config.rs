//! Tool configuration: runtime program, logging, and upgrade checks.
//!
//! Loaded in layers by [`ConfigLoader`]: built-in defaults, the global config file, then
//! `TASKRUN__*` environment variables. Command-line flags are applied on top by the CLI.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root::{config_home, global_config_path};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Default runtime used for file scripts.
pub const DEFAULT_RUNTIME_PROGRAM: &str = "deno";

/// Default subcommand passed to the runtime before options.
pub const DEFAULT_RUNTIME_SUBCOMMAND: &str = "run";

/// Repository queried for newer releases.
pub const DEFAULT_UPGRADE_REPOSITORY: &str = "taskrun-dev/taskrun";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskrunConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub upgrade: UpgradeConfig,
}

/// Runtime used to execute file scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,

    /// Subcommand placed before the resolved options; empty for none.
    #[serde(default = "default_subcommand")]
    pub subcommand: String,
}

fn default_program() -> String {
    DEFAULT_RUNTIME_PROGRAM.to_string()
}

fn default_subcommand() -> String {
    DEFAULT_RUNTIME_SUBCOMMAND.to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            subcommand: default_subcommand(),
        }
    }
}

/// Release check performed after a script finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// GitHub `owner/name`.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Upper bound on the release lookup.
    #[serde(default = "default_upgrade_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_repository() -> String {
    DEFAULT_UPGRADE_REPOSITORY.to_string()
}

fn default_upgrade_timeout_ms() -> u64 {
    1500
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            repository: default_repository(),
            timeout_ms: default_upgrade_timeout_ms(),
        }
    }
}
