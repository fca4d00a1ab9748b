//! Real subprocess runs; Unix only since they rely on `sh`.
#![cfg(unix)]

use std::sync::Arc;

use taskrun::config::RuntimeConfig;
use taskrun::launcher::SystemLauncher;
use taskrun::workspace::WorkspaceLocator;
use taskrun::{RunRequest, Runner};

use crate::support::{workspace_dir, write_file};

fn sh_runtime() -> RuntimeConfig {
    RuntimeConfig {
        program: "sh".to_string(),
        subcommand: String::new(),
    }
}

#[tokio::test]
async fn command_script_exit_code_is_returned() {
    let dir = workspace_dir("scripts:\n  fail:\n    command: exit 7\n");
    let runner = Runner::new(
        WorkspaceLocator::Directory(dir.path().to_path_buf()),
        sh_runtime(),
        Arc::new(SystemLauncher::new()),
    );

    let exit = runner
        .run_script(&RunRequest::new("fail", vec![]))
        .await
        .unwrap();
    assert_eq!(exit.code(), 7);
}

#[tokio::test]
async fn file_script_receives_passthrough_args_and_env() {
    let dir = workspace_dir("");
    let script = write_file(
        dir.path(),
        "check.sh",
        "test \"$GREETING\" = hello || exit 2\nexit \"$1\"\n",
    );
    write_file(
        dir.path(),
        "taskrun-workspace.yml",
        &format!(
            "scripts:\n  check:\n    file: {}\n    env:\n      GREETING: hello\n",
            script.display()
        ),
    );
    let runner = Runner::new(
        WorkspaceLocator::Directory(dir.path().to_path_buf()),
        sh_runtime(),
        Arc::new(SystemLauncher::new()),
    );

    let exit = runner
        .run_script(&RunRequest::new("check", vec!["9".to_string()]))
        .await
        .unwrap();
    assert_eq!(exit.code(), 9);
}
