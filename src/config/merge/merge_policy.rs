//! Built-in defaults, the lowest-precedence layer.

use crate::config::{
    DEFAULT_RUNTIME_PROGRAM, DEFAULT_RUNTIME_SUBCOMMAND, DEFAULT_UPGRADE_REPOSITORY,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("runtime.program", DEFAULT_RUNTIME_PROGRAM)?
        .set_default("runtime.subcommand", DEFAULT_RUNTIME_SUBCOMMAND)?
        .set_default("upgrade.enabled", true)?
        .set_default("upgrade.repository", DEFAULT_UPGRADE_REPOSITORY)?
        .set_default("upgrade.timeout_ms", 1500)
}
