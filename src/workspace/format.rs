//! Format script listings and validation results as text or JSON.

use crate::workspace::types::{ScriptListOutput, ValidateResult};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format the script list as a human-readable table.
pub fn format_script_list_text(data: &ScriptListOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Scripts")));
    if let Some(ref path) = data.workspace_file {
        out.push_str(&format!("  Workspace: {}\n\n", path));
    }
    if data.scripts.is_empty() {
        out.push_str("  No scripts defined.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Kind", "Runs"]);
    for row in &data.scripts {
        let runs = match &row.error {
            Some(err) => err.clone(),
            None => row.target.clone(),
        };
        table.add_row(vec![row.name.clone(), row.kind.clone(), runs]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("\n  Total: {}\n", data.total));
    out
}

/// Format the script list as JSON.
pub fn format_script_list_json(data: &ScriptListOutput) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Format a validation result as text.
pub fn format_validate_text(data: &ValidateResult) -> String {
    if data.valid {
        return format!(
            "{} {} script(s) valid",
            "ok".green(),
            data.script_count
        );
    }
    let mut out = format!(
        "{} {} of {} script(s) invalid\n",
        "error".red(),
        data.errors.len(),
        data.script_count
    );
    for err in &data.errors {
        out.push_str(&format!("  - {}\n", err));
    }
    out
}
