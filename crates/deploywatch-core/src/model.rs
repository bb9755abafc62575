//! Deployment identity, snapshots and canonical states

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity of the deployment tracked by one invocation
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentIdentity {
    /// Provider-side project name (e.g. the Cloudflare Pages project)
    pub project_name: String,

    /// Commit the deployment was triggered for
    pub commit_hash: String,

    /// Sink-side correlation id (e.g. the GitHub deployment id)
    pub sink_deployment_id: String,
}

impl DeploymentIdentity {
    pub fn new(
        project_name: impl Into<String>,
        commit_hash: impl Into<String>,
        sink_deployment_id: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            commit_hash: commit_hash.into(),
            sink_deployment_id: sink_deployment_id.into(),
        }
    }
}

/// The provider's view of a deployment at the time of one poll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatusSnapshot {
    /// Provider stage label (e.g. "build", "deploy")
    pub stage: String,

    /// Provider outcome label (e.g. "active", "success", "failure")
    pub status: String,

    /// Public URL of the deployment
    pub url: Option<String>,

    /// Provider-assigned deployment id
    pub id: Option<String>,
}

impl RawStatusSnapshot {
    pub fn new(stage: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            status: status.into(),
            url: None,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Canonical deployment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationState {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Unknown,
}

impl ReconciliationState {
    /// Whether reporting this state ends the reconciliation
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReconciliationState::Succeeded
                | ReconciliationState::Failed
                | ReconciliationState::Unknown
        )
    }
}

impl std::fmt::Display for ReconciliationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconciliationState::Pending => write!(f, "pending"),
            ReconciliationState::InProgress => write!(f, "in-progress"),
            ReconciliationState::Succeeded => write!(f, "succeeded"),
            ReconciliationState::Failed => write!(f, "failed"),
            ReconciliationState::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single status update handed to a [`crate::StatusSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Human-readable description
    pub description: String,

    /// Sink environment name (e.g. "production")
    pub environment: String,

    pub state: ReconciliationState,

    /// Provider dashboard / build log URL
    pub log_url: Option<String>,

    /// Public URL of the deployed site, only set on success
    pub environment_url: Option<String>,
}

/// Polling cadence and budget for the reconciliation loop
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Wait between two polls
    pub poll_interval: Duration,

    /// Total number of polls before giving up
    pub max_attempts: u32,

    /// Environment name passed to the sink
    pub environment: String,
}

impl PollConfig {
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
    pub const DEFAULT_ENVIRONMENT: &'static str = "production";

    pub fn new(
        poll_interval: Duration,
        max_attempts: u32,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            poll_interval,
            max_attempts,
            environment: environment.into(),
        }
    }

    /// Reject budgets the loop cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(CoreError::InvalidConfig(
                "max_attempts must be greater than zero".to_string(),
            ));
        }
        if self.environment.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "environment must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Upper bound on the time spent sleeping between polls
    pub fn max_wait(&self) -> Duration {
        self.poll_interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(Self::DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            environment: Self::DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}
