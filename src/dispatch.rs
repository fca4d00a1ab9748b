//! Dispatch: classify a script entry and build the invocation for it.
//!
//! Classification turns the authored [`ScriptDefinition`] into the two-variant
//! [`WorkspaceScript`]; ambiguous or empty entries are rejected here, before anything is
//! spawned. Planning then picks the launch strategy for the variant.

use crate::config::RuntimeConfig;
use crate::error::RunError;
use crate::launcher::Invocation;
use crate::options::{resolve_options, shadowed_keys, unknown_keys, unsupported_keys};
use crate::workspace::{
    ScriptDefinition, ScriptSummary, WorkspaceDefinition, WorkspaceOptions, WorkspaceScript,
};
use tracing::warn;

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Classify an authored entry; presence of `file`/`command` is checked by value.
pub fn classify(name: &str, definition: &ScriptDefinition) -> Result<WorkspaceScript, RunError> {
    match (present(&definition.file), present(&definition.command)) {
        (Some(_), Some(_)) => Err(RunError::FileAndCommandSpecified(name.to_string())),
        (Some(file), None) => Ok(WorkspaceScript::File {
            file: file.to_string(),
            options: definition.local_options(),
            env: definition.env.clone(),
        }),
        (None, Some(command)) => Ok(WorkspaceScript::Command {
            command: command.to_string(),
            env: definition.env.clone(),
        }),
        (None, None) => Err(RunError::MissingFileOrCommand(name.to_string())),
    }
}

/// Build the invocation for a classified script.
///
/// File scripts run as `[program, subcommand, ...options, file, ...passthrough]`;
/// command scripts run as `[command, ...passthrough]` with no runtime prefix or options.
pub fn plan(
    script: &WorkspaceScript,
    globals: &WorkspaceOptions,
    runtime: &RuntimeConfig,
    passthrough: &[String],
) -> Invocation {
    match script {
        WorkspaceScript::File { file, options, env } => {
            for key in unknown_keys(globals, options) {
                warn!(option = %key, "Ignoring unknown runtime option");
            }
            for key in unsupported_keys(globals, options) {
                warn!(option = %key, "Ignoring runtime option with unsupported value");
            }
            let shadowed = shadowed_keys(globals).into_iter().chain(shadowed_keys(options));
            for (ignored, used) in shadowed {
                warn!(option = %ignored, used = %used, "Ignoring option spelled twice");
            }
            let mut args = Vec::new();
            if !runtime.subcommand.is_empty() {
                args.push(runtime.subcommand.clone());
            }
            args.extend(resolve_options(globals, options));
            args.push(file.clone());
            args.extend(passthrough.iter().cloned());
            Invocation::Runtime {
                program: runtime.program.clone(),
                args,
                env: env.clone(),
            }
        }
        WorkspaceScript::Command { command, env } => Invocation::Command {
            command: command.clone(),
            args: passthrough.to_vec(),
            env: env.clone(),
        },
    }
}

/// Classify every entry for listing and validation.
pub fn summarize(workspace: &WorkspaceDefinition) -> Vec<ScriptSummary> {
    workspace
        .scripts
        .iter()
        .map(|(name, definition)| match classify(name, definition) {
            Ok(script) => ScriptSummary {
                name: name.clone(),
                kind: script.kind().to_string(),
                target: script.target().to_string(),
                error: None,
            },
            Err(e) => ScriptSummary {
                name: name.clone(),
                kind: "invalid".to_string(),
                target: String::new(),
                error: Some(e.to_string()),
            },
        })
        .collect()
}
