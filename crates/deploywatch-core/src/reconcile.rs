//! Reconciliation loop
//!
//! Polls a [`StatusProvider`] until the deployment reaches a terminal state
//! or the attempt budget runs out, forwarding one [`StatusReport`] to the
//! [`StatusSink`] per poll.
//!
//! ```text
//!   Polling ──snapshot──▶ Reporting ──Failed/Succeeded──▶ Terminated
//!      ▲                      │
//!      └──sleep(interval)─────┘ (InProgress, budget left)
//!
//!   budget exhausted ──report Unknown──▶ Terminated
//! ```

use crate::mapper::classify;
use crate::model::{
    DeploymentIdentity, PollConfig, RawStatusSnapshot, ReconciliationState, StatusReport,
};
use crate::provider::{StatusProvider, StatusSink};
use tokio::time::sleep;

/// Final result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Terminal state (Succeeded, Failed or Unknown)
    pub state: ReconciliationState,

    /// Number of polls consumed, including the one that terminated the run
    pub attempts: u32,

    /// Provider deployment id, only set on success
    pub deployment_id: Option<String>,

    /// Public deployment URL, only set on success
    pub deployment_url: Option<String>,
}

impl ReconcileOutcome {
    fn terminated(state: ReconciliationState, attempts: u32) -> Self {
        Self {
            state,
            attempts,
            deployment_id: None,
            deployment_url: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state == ReconciliationState::Succeeded
    }
}

/// Drives the poll → classify → report cycle for a single deployment
pub struct Reconciler<'a> {
    provider: &'a dyn StatusProvider,
    sink: &'a dyn StatusSink,
    config: PollConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        provider: &'a dyn StatusProvider,
        sink: &'a dyn StatusSink,
        config: PollConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run the loop to completion
    ///
    /// Never fails: provider errors consume an attempt and sink errors are
    /// logged and ignored. Exactly one terminal report is sent.
    pub async fn run(&self, identity: &DeploymentIdentity) -> ReconcileOutcome {
        let max_attempts = self.config.max_attempts;
        let mut attempts: u32 = 0;
        // Last deployment id seen, so failed polls still link to the dashboard
        let mut last_deployment_id: Option<String> = None;

        tracing::info!(
            "Tracking {} deployment of {} at {} (max {} attempts, every {:?})",
            self.provider.display_name(),
            identity.project_name,
            identity.commit_hash,
            max_attempts,
            self.config.poll_interval
        );

        while attempts < max_attempts {
            let attempt = attempts + 1;

            match self.provider.fetch_status(identity).await {
                Ok(snapshot) => {
                    if let Some(id) = &snapshot.id {
                        last_deployment_id = Some(id.clone());
                    }
                    let state = classify(&snapshot, self.provider.vocabulary());
                    tracing::info!(
                        "[{}/{}] {} {} -> {}",
                        attempt,
                        max_attempts,
                        snapshot.stage,
                        snapshot.status,
                        state
                    );

                    match state {
                        ReconciliationState::Failed => {
                            self.publish(self.failed_report(identity, &snapshot)).await;
                            return ReconcileOutcome::terminated(
                                ReconciliationState::Failed,
                                attempt,
                            );
                        }
                        ReconciliationState::Succeeded => {
                            self.publish(self.succeeded_report(identity, &snapshot)).await;
                            return ReconcileOutcome {
                                state: ReconciliationState::Succeeded,
                                attempts: attempt,
                                deployment_id: snapshot.id,
                                deployment_url: snapshot.url,
                            };
                        }
                        _ => {
                            self.publish(self.progress_report(identity, snapshot.id.as_deref()))
                                .await;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "[{}/{}] Failed to fetch {} status: {}",
                        attempt,
                        max_attempts,
                        self.provider.display_name(),
                        e
                    );
                    self.publish(self.progress_report(identity, last_deployment_id.as_deref()))
                        .await;
                }
            }

            attempts = attempt;

            // 最後の試行でなければ待機
            if attempts < max_attempts {
                sleep(self.config.poll_interval).await;
            }
        }

        tracing::warn!(
            "{} deployment did not settle after {} attempts",
            self.provider.display_name(),
            attempts
        );
        self.publish(self.report(
            ReconciliationState::Unknown,
            "deployment status unknown.",
            None,
            None,
        ))
        .await;

        ReconcileOutcome::terminated(ReconciliationState::Unknown, attempts)
    }

    async fn publish(&self, report: StatusReport) {
        if let Err(e) = self.sink.publish_status(&report).await {
            tracing::warn!(
                "Failed to publish {} status to {}: {}",
                report.state,
                self.sink.name(),
                e
            );
        }
    }

    fn failed_report(
        &self,
        identity: &DeploymentIdentity,
        snapshot: &RawStatusSnapshot,
    ) -> StatusReport {
        self.report(
            ReconciliationState::Failed,
            "deployment failed.",
            self.dashboard_url(identity, snapshot.id.as_deref()),
            None,
        )
    }

    fn succeeded_report(
        &self,
        identity: &DeploymentIdentity,
        snapshot: &RawStatusSnapshot,
    ) -> StatusReport {
        self.report(
            ReconciliationState::Succeeded,
            "deployment success.",
            self.dashboard_url(identity, snapshot.id.as_deref()),
            snapshot.url.clone(),
        )
    }

    fn progress_report(
        &self,
        identity: &DeploymentIdentity,
        deployment_id: Option<&str>,
    ) -> StatusReport {
        self.report(
            ReconciliationState::InProgress,
            "deployment in progress.",
            self.dashboard_url(identity, deployment_id),
            None,
        )
    }

    fn dashboard_url(
        &self,
        identity: &DeploymentIdentity,
        deployment_id: Option<&str>,
    ) -> Option<String> {
        deployment_id.and_then(|id| self.provider.log_url(identity, id))
    }

    fn report(
        &self,
        state: ReconciliationState,
        summary: &str,
        log_url: Option<String>,
        environment_url: Option<String>,
    ) -> StatusReport {
        StatusReport {
            description: format!("{} {}", self.provider.display_name(), summary),
            environment: self.config.environment.clone(),
            state,
            log_url,
            environment_url,
        }
    }
}
