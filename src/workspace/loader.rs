//! Workspace file discovery and parsing.

use crate::error::RunError;
use crate::workspace::types::{WorkspaceDefinition, WorkspaceFile};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File stems searched for, in priority order.
pub const WORKSPACE_FILE_STEMS: [&str; 2] = ["taskrun-workspace", "deno-workspace"];

/// Extensions searched for each stem, in priority order.
pub const WORKSPACE_FILE_EXTENSIONS: [&str; 4] = ["yml", "yaml", "json", "toml"];

/// Serialization format of a workspace file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceFormat {
    Yaml,
    Json,
    Toml,
}

impl WorkspaceFormat {
    pub fn from_path(path: &Path) -> Result<Self, RunError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yml") | Some("yaml") => Ok(WorkspaceFormat::Yaml),
            Some("json") => Ok(WorkspaceFormat::Json),
            Some("toml") => Ok(WorkspaceFormat::Toml),
            _ => Err(RunError::WorkspaceLoad(format!(
                "Unsupported workspace file format: {} (expected .yml, .yaml, .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Where to read the workspace from.
#[derive(Debug, Clone)]
pub enum WorkspaceLocator {
    /// Search a directory for a known workspace file name.
    Directory(PathBuf),
    /// Read exactly this file.
    File(PathBuf),
}

impl WorkspaceLocator {
    pub fn load(&self) -> Result<WorkspaceDefinition, RunError> {
        match self {
            WorkspaceLocator::Directory(dir) => load_workspace(dir),
            WorkspaceLocator::File(path) => load_workspace_file(path),
        }
    }
}

/// Find the workspace file in `dir`.
pub fn discover_workspace_file(dir: &Path) -> Result<PathBuf, RunError> {
    for stem in WORKSPACE_FILE_STEMS {
        for ext in WORKSPACE_FILE_EXTENSIONS {
            let candidate = dir.join(format!("{}.{}", stem, ext));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }
    Err(RunError::WorkspaceLoad(format!(
        "No workspace file found in {} (looked for {}.{{{}}})",
        dir.display(),
        WORKSPACE_FILE_STEMS.join("|"),
        WORKSPACE_FILE_EXTENSIONS.join(",")
    )))
}

/// Discover and load the workspace in `dir`.
pub fn load_workspace(dir: &Path) -> Result<WorkspaceDefinition, RunError> {
    let path = discover_workspace_file(dir)?;
    load_workspace_file(&path)
}

/// Load a specific workspace file.
pub fn load_workspace_file(path: &Path) -> Result<WorkspaceDefinition, RunError> {
    let format = WorkspaceFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| {
        RunError::WorkspaceLoad(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let mut workspace = parse_workspace(&content, format).map_err(|e| match e {
        RunError::WorkspaceLoad(msg) => {
            RunError::WorkspaceLoad(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    workspace.source = Some(dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
    debug!(
        path = %path.display(),
        scripts = workspace.scripts.len(),
        "Loaded workspace"
    );
    Ok(workspace)
}

/// Parse workspace content in the given format.
pub fn parse_workspace(
    content: &str,
    format: WorkspaceFormat,
) -> Result<WorkspaceDefinition, RunError> {
    let file: WorkspaceFile = match format {
        WorkspaceFormat::Yaml => {
            if content.trim().is_empty() {
                WorkspaceFile::default()
            } else {
                serde_yaml::from_str(content)
                    .map_err(|e| RunError::WorkspaceLoad(format!("Invalid YAML: {}", e)))?
            }
        }
        WorkspaceFormat::Json => serde_json::from_str(content)
            .map_err(|e| RunError::WorkspaceLoad(format!("Invalid JSON: {}", e)))?,
        WorkspaceFormat::Toml => toml::from_str(content)
            .map_err(|e| RunError::WorkspaceLoad(format!("Invalid TOML: {}", e)))?,
    };
    Ok(WorkspaceDefinition::from(file))
}
