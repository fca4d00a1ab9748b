//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TaskrunConfig;
use crate::error::RunError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<TaskrunConfig, RunError> {
        Ok(MergeService::load()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TaskrunConfig, RunError> {
        if !path.is_file() {
            return Err(RunError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }
}
