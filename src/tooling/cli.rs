//! CLI Tooling
//!
//! Command-line interface: `run` a workspace script, `list` scripts, `validate` entries.
//! The context parses nothing itself; it loads configuration, builds collaborators and
//! returns output plus an exit code for the binary to act on.

use crate::config::{ConfigLoader, TaskrunConfig};
use crate::dispatch::summarize;
use crate::error::RunError;
use crate::launcher::{ExitResult, Invocation, ProcessLauncher, RecordingLauncher, SystemLauncher};
use crate::logging::{init_logging, LoggingOverrides};
use crate::runner::{RunRequest, Runner};
use crate::upgrade::{GithubReleaseNotifier, NoopNotifier, UpgradeNotifier};
use crate::workspace::{
    format_script_list_json, format_script_list_text, format_validate_text, ScriptListOutput,
    ValidateResult, WorkspaceLocator,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Taskrun CLI - run named workspace scripts
#[derive(Parser, Debug)]
#[command(name = "taskrun", version)]
#[command(about = "Run named workspace scripts with a runtime and merged options")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for the workspace file
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Workspace file to use instead of searching the workspace directory
    #[arg(long, global = true)]
    pub workspace_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Runtime program for file scripts (default: deno)
    #[arg(long, global = true)]
    pub runtime: Option<String>,

    /// Skip the release check after the script exits
    #[arg(long, global = true)]
    pub no_upgrade_check: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run a workspace script; arguments after the script name are passed through
    Run {
        /// Print the command that would run instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Script name followed by arguments for the script
        #[arg(
            value_name = "SCRIPT",
            required = true,
            num_args = 1..,
            trailing_var_arg = true
        )]
        script_and_args: Vec<String>,
    },
    /// List scripts defined in the workspace
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check every script entry and report the broken ones
    Validate {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// What the binary prints and the code it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: Option<String>,
    pub exit: ExitResult,
}

impl CommandOutcome {
    fn printed(output: String, exit: ExitResult) -> Self {
        Self {
            output: Some(output),
            exit,
        }
    }
}

/// Exit code for every failure that is not the child's own exit status.
pub const ERROR_EXIT_CODE: i32 = 1;

/// Process exit code for a finished command: the outcome's code, or
/// [`ERROR_EXIT_CODE`] for any error.
pub fn exit_code(result: &Result<CommandOutcome, RunError>) -> i32 {
    match result {
        Ok(outcome) => outcome.exit.code(),
        Err(_) => ERROR_EXIT_CODE,
    }
}

/// CLI context for one invocation
pub struct CliContext {
    config: TaskrunConfig,
    locator: WorkspaceLocator,
    upgrade_check: bool,
}

impl CliContext {
    /// Create a new CLI context from parsed arguments
    pub fn new(cli: &Cli) -> Result<Self, RunError> {
        let mut config = if let Some(cfg_path) = &cli.config {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load()?
        };

        if let Some(runtime) = &cli.runtime {
            config.runtime.program = runtime.clone();
        }
        config.logging = config.logging.with_overrides(&LoggingOverrides {
            level: cli.log_level.clone(),
            format: cli.log_format.clone(),
            output: cli.log_output.clone(),
            file: cli.log_file.clone(),
        });

        let locator = match &cli.workspace_file {
            Some(file) => WorkspaceLocator::File(file.clone()),
            None => WorkspaceLocator::Directory(cli.workspace.clone()),
        };

        Ok(Self {
            upgrade_check: config.upgrade.enabled && !cli.no_upgrade_check,
            config,
            locator,
        })
    }

    pub fn config(&self) -> &TaskrunConfig {
        &self.config
    }

    /// Install the tracing subscriber for this invocation.
    pub fn init_logging(&self) -> Result<(), RunError> {
        init_logging(Some(&self.config.logging))
    }

    fn runner(&self, launcher: Arc<dyn ProcessLauncher>) -> Runner {
        Runner::new(self.locator.clone(), self.config.runtime.clone(), launcher)
    }

    fn notifier(&self) -> Arc<dyn UpgradeNotifier> {
        if self.upgrade_check {
            Arc::new(GithubReleaseNotifier::from_config(&self.config.upgrade))
        } else {
            Arc::new(NoopNotifier)
        }
    }

    /// Execute a CLI command
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutcome, RunError> {
        match command {
            Commands::Run {
                dry_run,
                script_and_args,
            } => {
                let (script, args) = script_and_args
                    .split_first()
                    .ok_or_else(|| RunError::ScriptNotFound(String::new()))?;
                let request = RunRequest::new(script.clone(), args.to_vec());
                if *dry_run {
                    self.handle_dry_run(&request).await
                } else {
                    self.handle_run(&request).await
                }
            }
            Commands::List { format } => self.handle_list(format),
            Commands::Validate { format } => self.handle_validate(format),
        }
    }

    async fn handle_run(&self, request: &RunRequest) -> Result<CommandOutcome, RunError> {
        let runner = self
            .runner(Arc::new(SystemLauncher::new()))
            .with_notifier(self.notifier());
        let exit = runner.run_script(request).await?;
        Ok(CommandOutcome { output: None, exit })
    }

    async fn handle_dry_run(&self, request: &RunRequest) -> Result<CommandOutcome, RunError> {
        let launcher = Arc::new(RecordingLauncher::new());
        self.runner(launcher.clone()).run_script(request).await?;
        let output = launcher
            .last()
            .map(|invocation| format_invocation(&invocation))
            .unwrap_or_default();
        Ok(CommandOutcome::printed(output, ExitResult::SUCCESS))
    }

    fn handle_list(&self, format: &str) -> Result<CommandOutcome, RunError> {
        let workspace = self.locator.load()?;
        let scripts = summarize(&workspace);
        let result = ScriptListOutput {
            workspace_file: workspace
                .source
                .as_ref()
                .map(|p| p.display().to_string()),
            total: scripts.len(),
            scripts,
        };
        let output = match format {
            "json" => format_script_list_json(&result),
            _ => format_script_list_text(&result),
        };
        Ok(CommandOutcome::printed(output, ExitResult::SUCCESS))
    }

    fn handle_validate(&self, format: &str) -> Result<CommandOutcome, RunError> {
        let workspace = self.locator.load()?;
        let summaries = summarize(&workspace);
        let errors: Vec<String> = summaries.iter().filter_map(|s| s.error.clone()).collect();
        let result = ValidateResult {
            valid: errors.is_empty(),
            script_count: summaries.len(),
            errors,
        };
        debug!(valid = result.valid, scripts = result.script_count, "Validated workspace");
        let exit = if result.valid {
            ExitResult::SUCCESS
        } else {
            ExitResult(1)
        };
        let output = match format {
            "json" => serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string()),
            _ => format_validate_text(&result),
        };
        Ok(CommandOutcome::printed(output, exit))
    }
}

/// Render an invocation as a copy-pasteable command line.
pub fn format_invocation(invocation: &Invocation) -> String {
    let mut parts: Vec<String> = invocation
        .env()
        .iter()
        .map(|(k, v)| format!("{}={}", k, quote(v)))
        .collect();
    match invocation {
        Invocation::Runtime { .. } => {
            parts.extend(invocation.argv().iter().map(|a| quote(a)));
        }
        Invocation::Command { command, args, .. } => {
            parts.push(command.clone());
            parts.extend(args.iter().map(|a| quote(a)));
        }
    }
    parts.join(" ")
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,@+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn run_collects_trailing_args_verbatim() {
        let cli = Cli::try_parse_from(["taskrun", "run", "start", "--port", "8080", "-v"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                dry_run: false,
                script_and_args: vec![
                    "start".to_string(),
                    "--port".to_string(),
                    "8080".to_string(),
                    "-v".to_string(),
                ],
            }
        );
    }

    #[test]
    fn errors_exit_one_and_outcomes_keep_their_code() {
        let failed: Result<CommandOutcome, RunError> =
            Err(RunError::ScriptNotFound("missing".to_string()));
        assert_eq!(exit_code(&failed), 1);

        let child = Ok(CommandOutcome {
            output: None,
            exit: ExitResult(42),
        });
        assert_eq!(exit_code(&child), 42);
    }

    #[test]
    fn run_requires_a_script() {
        assert!(Cli::try_parse_from(["taskrun", "run"]).is_err());
    }

    #[test]
    fn global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "taskrun",
            "--workspace",
            "/tmp/ws",
            "--runtime",
            "bun",
            "run",
            "--dry-run",
            "test",
        ])
        .unwrap();
        assert_eq!(cli.workspace, PathBuf::from("/tmp/ws"));
        assert_eq!(cli.runtime.as_deref(), Some("bun"));
        assert!(matches!(cli.command, Commands::Run { dry_run: true, .. }));
    }

    #[test]
    fn format_invocation_quotes_when_needed() {
        let invocation = Invocation::Runtime {
            program: "deno".to_string(),
            args: vec!["run".to_string(), "main.ts".to_string(), "a b".to_string()],
            env: BTreeMap::from([("MODE".to_string(), "dev".to_string())]),
        };
        assert_eq!(format_invocation(&invocation), "MODE=dev deno run main.ts 'a b'");

        let invocation = Invocation::Command {
            command: "eslint .".to_string(),
            args: vec!["--fix".to_string()],
            env: BTreeMap::new(),
        };
        assert_eq!(format_invocation(&invocation), "eslint . --fix");
    }
}
