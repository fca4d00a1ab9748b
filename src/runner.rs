//! Run one named script: look it up, dispatch it, launch it, hand back its exit code.
//!
//! Nothing here terminates the process; the binary is the only place that calls
//! `std::process::exit`.

use crate::config::RuntimeConfig;
use crate::dispatch::{classify, plan};
use crate::error::RunError;
use crate::launcher::{ExitResult, ProcessLauncher};
use crate::upgrade::{NoopNotifier, UpgradeNotifier, CURRENT_VERSION};
use crate::workspace::{WorkspaceDefinition, WorkspaceLocator};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// A script name plus the arguments passed through to it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub script: String,
    pub passthrough: Vec<String>,
}

impl RunRequest {
    pub fn new(script: impl Into<String>, passthrough: Vec<String>) -> Self {
        Self {
            script: script.into(),
            passthrough,
        }
    }
}

/// Run a script from an already loaded workspace.
///
/// Errors are returned before anything is spawned when the script is unknown or its
/// entry is ambiguous or empty.
pub async fn run(
    workspace: &WorkspaceDefinition,
    runtime: &RuntimeConfig,
    request: &RunRequest,
    launcher: &dyn ProcessLauncher,
) -> Result<ExitResult, RunError> {
    let definition = workspace
        .script(&request.script)
        .ok_or_else(|| RunError::ScriptNotFound(request.script.clone()))?;
    let script = classify(&request.script, definition)?;
    let invocation = plan(&script, &workspace.globals, runtime, &request.passthrough);

    info!(
        script = %request.script,
        kind = script.kind(),
        target = script.target(),
        "Running script"
    );
    launcher.launch(&invocation).await
}

/// Workspace location, runtime and collaborators for one invocation.
pub struct Runner {
    locator: WorkspaceLocator,
    runtime: RuntimeConfig,
    launcher: Arc<dyn ProcessLauncher>,
    notifier: Arc<dyn UpgradeNotifier>,
}

impl Runner {
    pub fn new(
        locator: WorkspaceLocator,
        runtime: RuntimeConfig,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            locator,
            runtime,
            launcher,
            notifier: Arc::new(NoopNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn UpgradeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn load_workspace(&self) -> Result<WorkspaceDefinition, RunError> {
        self.locator.load()
    }

    /// Load the workspace, run the script, then run the upgrade check.
    ///
    /// Ctrl-C during the upgrade check abandons it; the script's exit code stands.
    pub async fn run_script(&self, request: &RunRequest) -> Result<ExitResult, RunError> {
        let workspace = self.load_workspace()?;
        let exit = run(&workspace, &self.runtime, request, self.launcher.as_ref()).await?;
        if !notify_until(self.notifier.as_ref(), interrupted()).await {
            debug!("Upgrade check interrupted");
        }
        Ok(exit)
    }
}

/// Resolves on Ctrl-C; never resolves when the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Run the upgrade check unless `cancel` resolves first. Returns whether it finished.
async fn notify_until(notifier: &dyn UpgradeNotifier, cancel: impl Future<Output = ()>) -> bool {
    tokio::select! {
        _ = notifier.notify(CURRENT_VERSION) => true,
        _ = cancel => false,
    }
}
