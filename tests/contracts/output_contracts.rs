use taskrun::tooling::cli::{exit_code, Cli, CliContext, Commands};
use taskrun::RunError;

use crate::support::{isolated_config, workspace_dir};

const WORKSPACE: &str = r#"
scripts:
  start:
    file: main.ts
    allow: [net, env]
  lint:
    command: eslint .
  broken:
    file: a.ts
    command: b
"#;

fn cli(dir: &std::path::Path, config: std::path::PathBuf) -> Cli {
    Cli {
        command: Commands::Validate {
            format: "text".to_string(),
        },
        workspace: dir.to_path_buf(),
        workspace_file: None,
        config: Some(config),
        runtime: None,
        no_upgrade_check: true,
        log_level: None,
        log_format: None,
        log_output: None,
        log_file: None,
    }
}

fn context(dir: &std::path::Path) -> CliContext {
    let config = isolated_config(dir);
    CliContext::new(&cli(dir, config)).unwrap()
}

#[tokio::test]
async fn list_json_contract_has_required_fields() {
    let dir = workspace_dir(WORKSPACE);
    let ctx = context(dir.path());

    let outcome = ctx
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .await
        .unwrap();

    assert!(outcome.exit.success());
    let parsed: serde_json::Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(parsed["total"].as_u64(), Some(3));
    assert!(parsed["workspace_file"].as_str().is_some());
    let scripts = parsed["scripts"].as_array().unwrap();
    let start = scripts.iter().find(|s| s["name"] == "start").unwrap();
    assert_eq!(start["kind"], "file");
    assert_eq!(start["target"], "main.ts");
    let broken = scripts.iter().find(|s| s["name"] == "broken").unwrap();
    assert_eq!(broken["kind"], "invalid");
    assert!(broken["error"].as_str().is_some());
}

#[tokio::test]
async fn validate_fails_with_broken_entries() {
    let dir = workspace_dir(WORKSPACE);
    let ctx = context(dir.path());

    let outcome = ctx
        .execute(&Commands::Validate {
            format: "json".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome.exit.code(), 1);
    let parsed: serde_json::Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(parsed["valid"], false);
    assert_eq!(parsed["script_count"].as_u64(), Some(3));
    assert_eq!(parsed["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dry_run_prints_invocation_without_spawning() {
    let dir = workspace_dir(WORKSPACE);
    let ctx = context(dir.path());

    let outcome = ctx
        .execute(&Commands::Run {
            dry_run: true,
            script_and_args: vec!["start".to_string(), "--port".to_string(), "8080".to_string()],
        })
        .await
        .unwrap();

    assert!(outcome.exit.success());
    assert_eq!(
        outcome.output.as_deref(),
        Some("runtime run --allow-net --allow-env main.ts --port 8080")
    );
}

#[tokio::test]
async fn run_of_missing_script_is_an_error() {
    let dir = workspace_dir(WORKSPACE);
    let ctx = context(dir.path());

    let result = ctx
        .execute(&Commands::Run {
            dry_run: true,
            script_and_args: vec!["missing".to_string()],
        })
        .await;

    assert!(matches!(result, Err(RunError::ScriptNotFound(name)) if name == "missing"));
}

#[tokio::test]
async fn every_error_path_exits_one() {
    let dir = workspace_dir(WORKSPACE);
    let ctx = context(dir.path());

    let missing = ctx
        .execute(&Commands::Run {
            dry_run: false,
            script_and_args: vec!["missing".to_string()],
        })
        .await;
    assert!(missing.is_err());
    assert_eq!(exit_code(&missing), 1);

    let ambiguous = ctx
        .execute(&Commands::Run {
            dry_run: false,
            script_and_args: vec!["broken".to_string()],
        })
        .await;
    assert!(matches!(ambiguous, Err(RunError::FileAndCommandSpecified(_))));
    assert_eq!(exit_code(&ambiguous), 1);

    // The configured runtime program "runtime" does not exist on the test host.
    let unspawnable = ctx
        .execute(&Commands::Run {
            dry_run: false,
            script_and_args: vec!["start".to_string()],
        })
        .await;
    assert!(matches!(unspawnable, Err(RunError::ProgramNotFound(_))));
    assert_eq!(exit_code(&unspawnable), 1);

    let invalid = ctx
        .execute(&Commands::Validate {
            format: "text".to_string(),
        })
        .await;
    assert_eq!(exit_code(&invalid), 1);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = workspace_dir(WORKSPACE);
    let result = CliContext::new(&cli(dir.path(), dir.path().join("absent.toml")));
    assert!(matches!(result, Err(RunError::Config(_))));
}
