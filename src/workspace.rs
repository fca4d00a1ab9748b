//! Workspace domain: script model, file loading, and listing output.

mod format;
mod loader;
mod types;

pub use format::{format_script_list_json, format_script_list_text, format_validate_text};
pub use loader::{
    discover_workspace_file, load_workspace, load_workspace_file, parse_workspace,
    WorkspaceFormat, WorkspaceLocator, WORKSPACE_FILE_EXTENSIONS, WORKSPACE_FILE_STEMS,
};
pub use types::*;
