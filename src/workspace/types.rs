//! Workspace model: scripts, options, and the file shapes they are loaded from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Single option value as authored in a workspace file.
///
/// Values of any other shape (floats, maps, mixed lists) still load, as
/// [`OptionValue::Unsupported`], so one odd key never fails the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
    Null,
    Unsupported(serde_json::Value),
}

impl OptionValue {
    /// Falsy values (`false`, `""`, `[]`, null) behave as if the key were absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Number(_) => true,
            OptionValue::Text(s) => !s.trim().is_empty(),
            OptionValue::List(items) => items.iter().any(|i| !i.trim().is_empty()),
            OptionValue::Null | OptionValue::Unsupported(_) => false,
        }
    }

    /// Whether the key counts as set at all. Null and unsupported values do not, so
    /// they neither override a global value nor shadow another spelling of the key.
    pub fn is_set(&self) -> bool {
        !matches!(self, OptionValue::Null | OptionValue::Unsupported(_))
    }

    /// Value as a list of non-empty entries; scalars become a single entry.
    pub fn entries(&self) -> Vec<String> {
        match self {
            OptionValue::Bool(true) => vec!["true".to_string()],
            OptionValue::Bool(false) => Vec::new(),
            OptionValue::Number(n) => vec![n.to_string()],
            OptionValue::Text(s) if s.trim().is_empty() => Vec::new(),
            OptionValue::Text(s) => vec![s.trim().to_string()],
            OptionValue::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect(),
            OptionValue::Null | OptionValue::Unsupported(_) => Vec::new(),
        }
    }
}

/// Option name to option value, for globals or a single script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceOptions(BTreeMap<String, OptionValue>);

impl WorkspaceOptions {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        self.0.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    /// Layer `other` on top of `self`; keys present in `other` replace ours.
    pub fn overlay(mut self, other: &WorkspaceOptions) -> Self {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for WorkspaceOptions {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A script entry exactly as authored.
///
/// Option keys may sit under `options` (or `deno_options`) or directly on the entry;
/// every key that is not one of the named fields is collected as an inline option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "WorkspaceOptions::is_empty")]
    pub options: WorkspaceOptions,

    #[serde(default, skip_serializing_if = "WorkspaceOptions::is_empty")]
    pub deno_options: WorkspaceOptions,

    /// Environment variables added to the child's inherited environment.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(flatten)]
    pub inline_options: WorkspaceOptions,
}

impl ScriptDefinition {
    /// Script-local options: inline keys, then `deno_options`, then `options`.
    pub fn local_options(&self) -> WorkspaceOptions {
        self.inline_options
            .clone()
            .overlay(&self.deno_options)
            .overlay(&self.options)
    }
}

/// Global defaults section of a workspace file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalsDefinition {
    #[serde(default)]
    pub options: WorkspaceOptions,

    #[serde(default)]
    pub deno_options: WorkspaceOptions,

    #[serde(flatten)]
    pub inline_options: WorkspaceOptions,
}

impl GlobalsDefinition {
    pub fn merged(&self) -> WorkspaceOptions {
        self.inline_options
            .clone()
            .overlay(&self.deno_options)
            .overlay(&self.options)
    }
}

/// Top-level shape of a workspace file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceFile {
    #[serde(default)]
    pub scripts: BTreeMap<String, ScriptDefinition>,

    #[serde(default)]
    pub globals: Option<GlobalsDefinition>,
}

/// Loaded workspace: read-only for the rest of the invocation.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceDefinition {
    pub scripts: BTreeMap<String, ScriptDefinition>,
    pub globals: WorkspaceOptions,
    /// File the workspace was read from; `None` when built in memory.
    pub source: Option<PathBuf>,
}

impl WorkspaceDefinition {
    pub fn script(&self, name: &str) -> Option<&ScriptDefinition> {
        self.scripts.get(name)
    }

    pub fn script_names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }
}

impl From<WorkspaceFile> for WorkspaceDefinition {
    fn from(file: WorkspaceFile) -> Self {
        Self {
            scripts: file.scripts,
            globals: file.globals.map(|g| g.merged()).unwrap_or_default(),
            source: None,
        }
    }
}

/// A script entry after classification: exactly one of the two launch shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceScript {
    /// Source file executed by the configured runtime with merged options.
    File {
        file: String,
        options: WorkspaceOptions,
        env: BTreeMap<String, String>,
    },
    /// Literal command line run through the platform shell; no option merging.
    Command {
        command: String,
        env: BTreeMap<String, String>,
    },
}

impl WorkspaceScript {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkspaceScript::File { .. } => "file",
            WorkspaceScript::Command { .. } => "command",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            WorkspaceScript::File { file, .. } => file,
            WorkspaceScript::Command { command, .. } => command,
        }
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        match self {
            WorkspaceScript::File { env, .. } | WorkspaceScript::Command { env, .. } => env,
        }
    }
}

/// One row of `taskrun list` / `taskrun validate` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSummary {
    pub name: String,
    pub kind: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the list command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptListOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_file: Option<String>,
    pub scripts: Vec<ScriptSummary>,
    pub total: usize,
}

/// Result of the validate command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub valid: bool,
    pub script_count: usize,
    pub errors: Vec<String>,
}
