//! Real subprocess launcher on top of `tokio::process`.

use super::invocation::{ExitResult, Invocation};
use super::ProcessLauncher;
use crate::error::RunError;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Launches invocations as child processes sharing this process's stdio.
#[derive(Debug, Default, Clone)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Build the `tokio` command for an invocation without spawning it.
    pub fn command_for(invocation: &Invocation) -> Command {
        let mut cmd = match invocation {
            Invocation::Runtime { program, args, .. } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Invocation::Command { command, args, .. } => shell_command(command, args),
        };
        // Inherited stdio keeps scripts interactive. `kill_on_drop(true)` ensures the
        // child does not outlive an aborted wait.
        cmd.envs(invocation.env())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

/// Passthrough args become positional parameters of the shell so they are never re-split.
#[cfg(unix)]
fn shell_command(command: &str, args: &[String]) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(shell_script(command)).arg("sh").args(args);
    cmd
}

/// `command` with `"$@"` appended so the args land on its last simple command.
///
/// A trailing comment or separator (`;`, `&`, `&&`, `|`, `||`) would detach the args
/// from the command, so those are removed first. A command that is only a comment is
/// left as is and never sees the args.
#[cfg(unix)]
fn shell_script(command: &str) -> String {
    let mut body = strip_trailing_comment(command).trim_end();
    while let Some(rest) = body.strip_suffix(|c: char| matches!(c, ';' | '&' | '|')) {
        if ends_with_escape(rest) {
            break;
        }
        body = rest.trim_end();
    }
    if body.is_empty() {
        return command.to_string();
    }
    format!("{} \"$@\"", body)
}

/// Drop a `#` comment on the last line; quotes and backslash escapes are honored.
#[cfg(unix)]
fn strip_trailing_comment(command: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut comment: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, c) in command.char_indices() {
        if comment.is_some() {
            if c == '\n' {
                comment = None;
            }
        } else if escaped {
            escaped = false;
        } else if c == '\\' && quote != Some('\'') {
            escaped = true;
        } else if let Some(q) = quote {
            if c == q {
                quote = None;
            }
        } else if c == '\'' || c == '"' {
            quote = Some(c);
        } else if c == '#' && prev.map_or(true, |p| p.is_whitespace() || ";&|()".contains(p)) {
            comment = Some(i);
        }
        prev = Some(c);
    }

    match comment {
        Some(start) => &command[..start],
        None => command,
    }
}

#[cfg(unix)]
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

#[cfg(windows)]
fn shell_command(command: &str, args: &[String]) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command).args(args);
    cmd
}

fn spawn_error(program: &str, err: std::io::Error) -> RunError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => RunError::PermissionDenied(program.to_string()),
        std::io::ErrorKind::NotFound => RunError::ProgramNotFound(program.to_string()),
        _ => RunError::Spawn(err),
    }
}

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    async fn launch(&self, invocation: &Invocation) -> Result<ExitResult, RunError> {
        let mut cmd = Self::command_for(invocation);
        debug!(argv = ?invocation.argv(), "Spawning child process");

        let mut child = cmd
            .spawn()
            .map_err(|e| spawn_error(invocation.program(), e))?;
        let status = wait_for_child(&mut child).await.map_err(RunError::Spawn)?;
        let exit = ExitResult::from(status);
        info!(code = exit.code(), "Child process exited");
        Ok(exit)
    }
}

/// Wait for the child while handling termination signals sent to this process.
///
/// SIGINT is absorbed: the child shares the terminal's process group, receives the same
/// interrupt, and decides its own exit status. SIGTERM is forwarded by killing the child.
#[cfg(unix)]
async fn wait_for_child(child: &mut Child) -> std::io::Result<ExitStatus> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let terminated = async move {
        loop {
            tokio::select! {
                Some(()) = interrupt.recv() => {
                    debug!("Received SIGINT, waiting for child to exit");
                }
                _ = terminate.recv() => {
                    info!("Received SIGTERM, stopping child process");
                    return;
                }
            }
        }
    };
    supervise(child, terminated).await
}

/// Wait for the child, killing it once `terminated` resolves.
#[cfg(unix)]
async fn supervise(
    child: &mut Child,
    terminated: impl std::future::Future<Output = ()>,
) -> std::io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => status,
        _ = terminated => {
            child.start_kill()?;
            child.wait().await
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_child(child: &mut Child) -> std::io::Result<ExitStatus> {
    loop {
        tokio::select! {
            status = child.wait() => return status,
            _ = tokio::signal::ctrl_c() => {
                debug!("Received Ctrl-C, waiting for child to exit");
            }
        }
    }
}
