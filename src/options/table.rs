//! Declarative table of known runtime options.
//!
//! Each entry names the key authored in a workspace file, how its value becomes CLI
//! tokens, and how a script-local value combines with a global one. Output order of the
//! resolver is the order of this table.

/// How an option value is rendered as CLI tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionShape {
    /// `true` renders `--name`; anything else falsy renders nothing.
    Flag,
    /// Renders `--name=<value>`.
    Value,
    /// `true` renders `--name`; text or list renders `--name=a,b`.
    FlagOrValue,
    /// Each entry renders `--allow-<entry>`; `all` renders `--allow-all`.
    Permissions,
    /// List renders a single `--name=a,b`.
    Joined,
}

/// How a script-local value combines with a global value for the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Script-local value replaces the global one.
    Override,
    /// Global entries, then script-local entries not already present.
    Union,
}

#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// Canonical key, also the CLI flag name.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub shape: OptionShape,
    pub merge: MergePolicy,
}

impl OptionSpec {
    const fn new(name: &'static str, shape: OptionShape) -> Self {
        Self {
            name,
            aliases: &[],
            shape,
            merge: MergePolicy::Override,
        }
    }

    const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn union(mut self) -> Self {
        self.merge = MergePolicy::Union;
        self
    }

    /// Keys that refer to this option, canonical first.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    pub fn matches(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }
}

pub const OPTION_TABLE: &[OptionSpec] = &[
    OptionSpec::new("allow", OptionShape::Permissions).aliases(&["permissions"]),
    OptionSpec::new("import-map", OptionShape::Value).aliases(&["importmap", "import_map"]),
    OptionSpec::new("config", OptionShape::Value),
    OptionSpec::new("lock", OptionShape::Value),
    OptionSpec::new("lock-write", OptionShape::Flag).aliases(&["lock_write"]),
    OptionSpec::new("cert", OptionShape::Value),
    OptionSpec::new("log-level", OptionShape::Value).aliases(&["log_level"]),
    OptionSpec::new("seed", OptionShape::Value),
    OptionSpec::new("location", OptionShape::Value),
    OptionSpec::new("reload", OptionShape::FlagOrValue),
    OptionSpec::new("unstable", OptionShape::Flag),
    OptionSpec::new("no-check", OptionShape::Flag).aliases(&["no_check"]),
    OptionSpec::new("cached-only", OptionShape::Flag).aliases(&["cached_only"]),
    OptionSpec::new("quiet", OptionShape::Flag),
    OptionSpec::new("inspect", OptionShape::FlagOrValue),
    OptionSpec::new("inspect-brk", OptionShape::FlagOrValue).aliases(&["inspect_brk"]),
    OptionSpec::new("v8-flags", OptionShape::Joined)
        .aliases(&["v8_flags"])
        .union(),
];

/// Look up the table entry for an authored key.
pub fn lookup(key: &str) -> Option<&'static OptionSpec> {
    OPTION_TABLE.iter().find(|spec| spec.matches(key))
}
