//! Merge global and script-local options into runtime CLI arguments.

use super::table::{lookup, MergePolicy, OptionShape, OptionSpec, OPTION_TABLE};
use crate::workspace::{OptionValue, WorkspaceOptions};

/// One token passed to the runtime before the target file.
pub type CliArgument = String;

/// Resolve the runtime arguments for a file script.
///
/// Pure and deterministic: the output order is the option table order, independent of
/// the order keys were authored in. A key present in `local` always takes part in the
/// result (it replaces the global value, or is appended to it for union options).
pub fn resolve_options(global: &WorkspaceOptions, local: &WorkspaceOptions) -> Vec<CliArgument> {
    let mut args = Vec::new();
    for spec in OPTION_TABLE {
        let merged = merge_values(spec, find_value(spec, global), find_value(spec, local));
        if let Some(value) = merged {
            render(spec, &value, &mut args);
        }
    }
    args
}

/// Keys in either option set that the option table does not know.
pub fn unknown_keys(global: &WorkspaceOptions, local: &WorkspaceOptions) -> Vec<String> {
    let mut keys: Vec<String> = global
        .iter()
        .chain(local.iter())
        .map(|(k, _)| k)
        .filter(|k| lookup(k).is_none())
        .cloned()
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Known keys whose value has a shape the option table cannot render.
pub fn unsupported_keys(global: &WorkspaceOptions, local: &WorkspaceOptions) -> Vec<String> {
    let mut keys: Vec<String> = global
        .iter()
        .chain(local.iter())
        .filter(|(k, v)| lookup(k).is_some() && matches!(v, OptionValue::Unsupported(_)))
        .map(|(k, _)| k.clone())
        .collect();
    keys.sort();
    keys.dedup();
    keys
}

/// Spellings of one option that lose to another spelling set in the same option set,
/// as `(ignored, used)` pairs.
pub fn shadowed_keys(options: &WorkspaceOptions) -> Vec<(String, String)> {
    let mut shadowed = Vec::new();
    for spec in OPTION_TABLE {
        let mut set = spec
            .keys()
            .filter(|key| options.get(key).is_some_and(OptionValue::is_set));
        if let Some(used) = set.next() {
            shadowed.extend(set.map(|key| (key.to_string(), used.to_string())));
        }
    }
    shadowed
}

fn find_value<'a>(spec: &OptionSpec, options: &'a WorkspaceOptions) -> Option<&'a OptionValue> {
    spec.keys()
        .filter_map(|key| options.get(key))
        .find(|value| value.is_set())
}

fn merge_values(
    spec: &OptionSpec,
    global: Option<&OptionValue>,
    local: Option<&OptionValue>,
) -> Option<OptionValue> {
    match (spec.merge, global, local) {
        (_, None, None) => None,
        (_, Some(only), None) | (_, None, Some(only)) => Some(only.clone()),
        (MergePolicy::Override, Some(_), Some(local)) => Some(local.clone()),
        (MergePolicy::Union, Some(global), Some(local)) => {
            let mut entries = global.entries();
            for entry in local.entries() {
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
            Some(OptionValue::List(entries))
        }
    }
}

fn render(spec: &OptionSpec, value: &OptionValue, args: &mut Vec<CliArgument>) {
    if !value.is_truthy() {
        return;
    }
    match spec.shape {
        OptionShape::Flag => args.push(format!("--{}", spec.name)),
        OptionShape::Value | OptionShape::Joined => {
            args.push(format!("--{}={}", spec.name, value.entries().join(",")));
        }
        OptionShape::FlagOrValue => match value {
            OptionValue::Bool(true) => args.push(format!("--{}", spec.name)),
            other => args.push(format!("--{}={}", spec.name, other.entries().join(","))),
        },
        OptionShape::Permissions => {
            let entries: Vec<String> = match value {
                OptionValue::Bool(true) => vec!["all".to_string()],
                other => other
                    .entries()
                    .iter()
                    .flat_map(|entry| entry.split(','))
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            };
            let mut seen = Vec::new();
            for entry in entries {
                let token = format!("--allow-{}", entry);
                if !seen.contains(&token) {
                    seen.push(token);
                }
            }
            args.extend(seen);
        }
    }
}
