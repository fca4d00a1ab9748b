//! What the launcher is asked to run, and what it hands back.

use std::collections::BTreeMap;

/// A single process to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `program` run directly with `args`.
    Runtime {
        program: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
    /// Literal command line run through the platform shell, with `args` appended.
    Command {
        command: String,
        args: Vec<String>,
        env: BTreeMap<String, String>,
    },
}

impl Invocation {
    /// Full argument vector, program or command first.
    pub fn argv(&self) -> Vec<String> {
        let (head, args) = match self {
            Invocation::Runtime { program, args, .. } => (program, args),
            Invocation::Command { command, args, .. } => (command, args),
        };
        std::iter::once(head.clone()).chain(args.iter().cloned()).collect()
    }

    /// Program (or command line) reported in spawn errors.
    pub fn program(&self) -> &str {
        match self {
            Invocation::Runtime { program, .. } => program,
            Invocation::Command { command, .. } => command,
        }
    }

    /// Variables added on top of the inherited environment.
    pub fn env(&self) -> &BTreeMap<String, String> {
        match self {
            Invocation::Runtime { env, .. } | Invocation::Command { env, .. } => env,
        }
    }
}

/// Exit code of the child, passed back to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitResult(pub i32);

impl ExitResult {
    pub const SUCCESS: ExitResult = ExitResult(0);

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }
}

impl From<std::process::ExitStatus> for ExitResult {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitResult(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitResult(128 + signal);
            }
        }
        ExitResult(1)
    }
}
