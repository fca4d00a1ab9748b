use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use taskrun::config::RuntimeConfig;
use taskrun::launcher::RecordingLauncher;
use taskrun::workspace::WorkspaceLocator;
use taskrun::Runner;
use tempfile::TempDir;

/// Runtime named "runtime" so argv assertions read like the documented examples.
pub fn test_runtime() -> RuntimeConfig {
    RuntimeConfig {
        program: "runtime".to_string(),
        subcommand: "run".to_string(),
    }
}

/// Write `taskrun-workspace.yml` into a fresh temp dir.
pub fn workspace_dir(yaml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "taskrun-workspace.yml", yaml);
    dir
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Runner over `dir` that records invocations instead of spawning them.
pub fn recording_runner(dir: &Path) -> (Runner, Arc<RecordingLauncher>) {
    let launcher = Arc::new(RecordingLauncher::new());
    let runner = Runner::new(
        WorkspaceLocator::Directory(dir.to_path_buf()),
        test_runtime(),
        launcher.clone(),
    );
    (runner, launcher)
}

/// Config file that keeps CLI tests off the network and away from user config.
pub fn isolated_config(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "taskrun-config.toml",
        "[runtime]\nprogram = \"runtime\"\n\n[upgrade]\nenabled = false\n\n[logging]\nenabled = false\n",
    )
}
