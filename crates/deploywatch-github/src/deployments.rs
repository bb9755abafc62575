//! GitHub deployment status API client

use crate::error::{GithubError, Result};
use async_trait::async_trait;
use deploywatch_core::{ReconciliationState, StatusReport, StatusSink};
use serde::Serialize;
use std::time::Duration;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("deploywatch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the deployment status sink
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// `owner/repo`
    pub repository: String,
    pub deployment_id: String,
    pub token: String,
    /// API base URL, without trailing slash
    pub api_base: String,
}

impl GithubConfig {
    pub fn new(
        repository: impl Into<String>,
        deployment_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let repository = repository.into();
        validate_repository(&repository)?;

        let deployment_id = deployment_id.into();
        if deployment_id.trim().is_empty() {
            return Err(GithubError::InvalidConfig(
                "deployment id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            repository,
            deployment_id,
            token: token.into(),
            api_base: GITHUB_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

fn validate_repository(repository: &str) -> Result<()> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok(())
        }
        _ => Err(GithubError::InvalidRepository(repository.to_string())),
    }
}

/// Map a canonical state onto the deployment status `state` field
pub fn github_state(state: ReconciliationState) -> &'static str {
    match state {
        ReconciliationState::Pending => "pending",
        ReconciliationState::InProgress => "in_progress",
        ReconciliationState::Succeeded => "success",
        ReconciliationState::Failed => "failure",
        ReconciliationState::Unknown => "error",
    }
}

/// Posts deployment statuses for a single GitHub deployment
pub struct GithubDeploymentStatus {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubDeploymentStatus {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn statuses_url(&self) -> String {
        format!(
            "{}/repos/{}/deployments/{}/statuses",
            self.config.api_base, self.config.repository, self.config.deployment_id
        )
    }

    /// Create a deployment status
    pub async fn create_status(&self, report: &StatusReport) -> Result<()> {
        let url = self.statuses_url();
        let request_body = CreateStatusRequest::from_report(report);
        tracing::debug!("POST {} state={}", url, request_body.state);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GithubError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl StatusSink for GithubDeploymentStatus {
    fn name(&self) -> &str {
        "github"
    }

    async fn publish_status(&self, report: &StatusReport) -> deploywatch_core::Result<()> {
        self.create_status(report).await?;
        Ok(())
    }
}

// ============ API Types ============

#[derive(Debug, Serialize)]
struct CreateStatusRequest {
    description: String,
    environment: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment_url: Option<String>,
}

impl CreateStatusRequest {
    fn from_report(report: &StatusReport) -> Self {
        Self {
            description: report.description.clone(),
            environment: report.environment.clone(),
            state: github_state(report.state),
            log_url: report.log_url.clone().filter(|u| !u.is_empty()),
            environment_url: report.environment_url.clone().filter(|u| !u.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(state: ReconciliationState) -> StatusReport {
        StatusReport {
            description: "Cloudflare Pages deployment in progress.".to_string(),
            environment: "production".to_string(),
            state,
            log_url: None,
            environment_url: None,
        }
    }

    #[test]
    fn test_state_mapping() {
        assert_eq!(github_state(ReconciliationState::Pending), "pending");
        assert_eq!(github_state(ReconciliationState::InProgress), "in_progress");
        assert_eq!(github_state(ReconciliationState::Succeeded), "success");
        assert_eq!(github_state(ReconciliationState::Failed), "failure");
        assert_eq!(github_state(ReconciliationState::Unknown), "error");
    }

    #[test]
    fn test_request_omits_missing_urls() {
        let body = serde_json::to_value(CreateStatusRequest::from_report(&report(
            ReconciliationState::InProgress,
        )))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "description": "Cloudflare Pages deployment in progress.",
                "environment": "production",
                "state": "in_progress"
            })
        );
    }

    #[test]
    fn test_request_includes_urls() {
        let mut report = report(ReconciliationState::Succeeded);
        report.log_url = Some("https://dash.cloudflare.com?to=/:account/pages/view/site/abc".to_string());
        report.environment_url = Some("https://site.pages.dev".to_string());

        let body = serde_json::to_value(CreateStatusRequest::from_report(&report)).unwrap();
        assert_eq!(body["state"], "success");
        assert_eq!(
            body["log_url"],
            "https://dash.cloudflare.com?to=/:account/pages/view/site/abc"
        );
        assert_eq!(body["environment_url"], "https://site.pages.dev");
    }

    #[test]
    fn test_statuses_url() {
        let config = GithubConfig::new("owner/repo", "1234", "token")
            .unwrap()
            .with_api_base("https://ghe.example.com/api/v3/");
        let sink = GithubDeploymentStatus::new(config).unwrap();

        assert_eq!(
            sink.statuses_url(),
            "https://ghe.example.com/api/v3/repos/owner/repo/deployments/1234/statuses"
        );
    }

    #[test]
    fn test_invalid_repository() {
        for repository in ["", "owner", "owner/", "/repo", "a/b/c"] {
            assert!(
                matches!(
                    GithubConfig::new(repository, "1", "token"),
                    Err(GithubError::InvalidRepository(_))
                ),
                "{repository}"
            );
        }
    }

    #[test]
    fn test_empty_deployment_id() {
        assert!(matches!(
            GithubConfig::new("owner/repo", " ", "token"),
            Err(GithubError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_sink_error() {
        let config = GithubConfig::new("owner/repo", "1", "token")
            .unwrap()
            .with_api_base("http://127.0.0.1:9");
        let sink = GithubDeploymentStatus::new(config).unwrap();

        let err = sink
            .publish_status(&report(ReconciliationState::InProgress))
            .await
            .unwrap_err();
        assert!(matches!(err, deploywatch_core::CoreError::SinkError(_)));
    }
}
