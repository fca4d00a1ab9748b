//! Advisory check for a newer release, run after the script has exited.
//!
//! The check never fails the invocation: every error is logged at debug level and
//! dropped, and the exit code of the script is reported unchanged.

use crate::config::UpgradeConfig;
use anyhow::Context;
use async_trait::async_trait;
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Duration;
use tracing::debug;

/// Version of this binary.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[async_trait]
pub trait UpgradeNotifier: Send + Sync {
    /// Tell the user about a newer release, if there is one.
    async fn notify(&self, current_version: &str);
}

/// Notifier that does nothing; used when checks are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl UpgradeNotifier for NoopNotifier {
    async fn notify(&self, _current_version: &str) {}
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Looks up the latest GitHub release of a repository.
#[derive(Debug, Clone)]
pub struct GithubReleaseNotifier {
    repository: String,
    timeout: Duration,
}

impl GithubReleaseNotifier {
    pub fn new(repository: impl Into<String>, timeout: Duration) -> Self {
        Self {
            repository: repository.into(),
            timeout,
        }
    }

    pub fn from_config(config: &UpgradeConfig) -> Self {
        Self::new(
            config.repository.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn latest_release_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/releases/latest",
            self.repository
        )
    }

    async fn latest_version(&self) -> anyhow::Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("taskrun/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        let release: LatestRelease = client
            .get(self.latest_release_url())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .context("requesting latest release")?
            .error_for_status()?
            .json()
            .await
            .context("decoding release response")?;
        Ok(release.tag_name)
    }
}

#[async_trait]
impl UpgradeNotifier for GithubReleaseNotifier {
    async fn notify(&self, current_version: &str) {
        let latest = match tokio::time::timeout(self.timeout, self.latest_version()).await {
            Ok(Ok(latest)) => latest,
            Ok(Err(e)) => {
                debug!(error = %e, "Release check failed");
                return;
            }
            Err(_) => {
                debug!("Release check timed out");
                return;
            }
        };
        if let Some(message) = upgrade_message(current_version, &latest, &self.repository) {
            eprintln!("{}", message);
        }
    }
}

/// Message shown when `latest` is newer than `current`, otherwise `None`.
pub fn upgrade_message(current: &str, latest: &str, repository: &str) -> Option<String> {
    if compare_versions(latest, current)? != Ordering::Greater {
        return None;
    }
    Some(format!(
        "{} {} -> {}\n  https://github.com/{}/releases/latest",
        "A new taskrun release is available:".yellow(),
        current.trim_start_matches('v'),
        latest.trim_start_matches('v').green(),
        repository
    ))
}

/// Compare dotted numeric versions with an optional `v` prefix.
///
/// Missing components count as zero; pre-release suffixes are ignored. Returns `None`
/// when either side is not a version.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;
    let len = a.len().max(b.len());
    for i in 0..len {
        let left = a.get(i).copied().unwrap_or(0);
        let right = b.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return Some(other),
        }
    }
    Some(Ordering::Equal)
}

fn parse_version(raw: &str) -> Option<Vec<u64>> {
    let core = raw
        .trim()
        .trim_start_matches('v')
        .split(['-', '+'])
        .next()?;
    if core.is_empty() {
        return None;
    }
    core.split('.').map(|part| part.parse().ok()).collect()
}
