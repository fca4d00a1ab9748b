use taskrun::launcher::Invocation;
use taskrun::{RunError, RunRequest};

use crate::support::{recording_runner, workspace_dir};

#[tokio::test]
async fn file_script_with_inline_permissions() {
    let dir = workspace_dir(
        r#"
scripts:
  start:
    file: main.ts
    allow:
      - net
"#,
    );
    let (runner, launcher) = recording_runner(dir.path());

    let exit = runner
        .run_script(&RunRequest::new(
            "start",
            vec!["--port".to_string(), "8080".to_string()],
        ))
        .await
        .unwrap();

    assert!(exit.success());
    assert_eq!(
        launcher.last().unwrap().argv(),
        vec!["runtime", "run", "--allow-net", "main.ts", "--port", "8080"]
    );
}

#[tokio::test]
async fn command_script_gets_raw_command() {
    let dir = workspace_dir("scripts:\n  lint:\n    command: eslint .\n");
    let (runner, launcher) = recording_runner(dir.path());

    runner
        .run_script(&RunRequest::new("lint", vec![]))
        .await
        .unwrap();

    let invocation = launcher.last().unwrap();
    assert!(matches!(invocation, Invocation::Command { .. }));
    assert_eq!(invocation.argv(), vec!["eslint ."]);
}

#[tokio::test]
async fn file_and_command_is_rejected_without_spawning() {
    let dir = workspace_dir("scripts:\n  bad:\n    file: x.ts\n    command: y\n");
    let (runner, launcher) = recording_runner(dir.path());

    let result = runner.run_script(&RunRequest::new("bad", vec![])).await;

    assert!(matches!(result, Err(RunError::FileAndCommandSpecified(name)) if name == "bad"));
    assert_eq!(launcher.launch_count(), 0);
}

#[tokio::test]
async fn missing_script_is_not_found() {
    let dir = workspace_dir("scripts:\n  start:\n    file: main.ts\n");
    let (runner, launcher) = recording_runner(dir.path());

    let result = runner.run_script(&RunRequest::new("missing", vec![])).await;

    assert!(matches!(result, Err(RunError::ScriptNotFound(name)) if name == "missing"));
    assert_eq!(launcher.launch_count(), 0);
}

#[tokio::test]
async fn entry_without_file_or_command_is_rejected() {
    let dir = workspace_dir("scripts:\n  empty:\n    file: ''\n    allow: [net]\n");
    let (runner, launcher) = recording_runner(dir.path());

    let result = runner.run_script(&RunRequest::new("empty", vec![])).await;

    assert!(matches!(result, Err(RunError::MissingFileOrCommand(name)) if name == "empty"));
    assert_eq!(launcher.launch_count(), 0);
}

#[tokio::test]
async fn broken_sibling_entry_does_not_block_valid_script() {
    let dir = workspace_dir(
        "scripts:\n  bad:\n    file: a.ts\n    command: b\n  good:\n    command: make\n",
    );
    let (runner, launcher) = recording_runner(dir.path());

    runner
        .run_script(&RunRequest::new("good", vec![]))
        .await
        .unwrap();
    assert_eq!(launcher.launch_count(), 1);
}

#[tokio::test]
async fn global_options_merge_under_script_options() {
    let dir = workspace_dir(
        r#"
scripts:
  dev:
    file: src/dev.ts
    deno_options:
      log-level: debug
      v8-flags: [--expose-gc]
globals:
  deno_options:
    log-level: info
    import-map: import_map.json
    v8-flags: [--max-old-space-size=2048]
"#,
    );
    let (runner, launcher) = recording_runner(dir.path());

    runner
        .run_script(&RunRequest::new("dev", vec![]))
        .await
        .unwrap();

    assert_eq!(
        launcher.last().unwrap().argv(),
        vec![
            "runtime",
            "run",
            "--import-map=import_map.json",
            "--log-level=debug",
            "--v8-flags=--max-old-space-size=2048,--expose-gc",
            "src/dev.ts",
        ]
    );
}

#[tokio::test]
async fn missing_workspace_file_is_a_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let (runner, _launcher) = recording_runner(dir.path());

    let result = runner.run_script(&RunRequest::new("start", vec![])).await;
    assert!(matches!(result, Err(RunError::WorkspaceLoad(_))));
}

#[tokio::test]
async fn odd_option_values_do_not_block_sibling_scripts() {
    let dir = workspace_dir(
        r#"
globals:
  allow: [env]
scripts:
  start:
    file: main.ts
    allow:
  odd:
    file: odd.ts
    timeout: 1.5
    cert:
      net: example.com
"#,
    );
    let (runner, launcher) = recording_runner(dir.path());

    runner
        .run_script(&RunRequest::new("start", vec![]))
        .await
        .unwrap();
    assert_eq!(
        launcher.last().unwrap().argv(),
        vec!["runtime", "run", "--allow-env", "main.ts"]
    );

    runner
        .run_script(&RunRequest::new("odd", vec![]))
        .await
        .unwrap();
    assert_eq!(
        launcher.last().unwrap().argv(),
        vec!["runtime", "run", "--allow-env", "odd.ts"]
    );
}
