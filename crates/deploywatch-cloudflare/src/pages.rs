//! Cloudflare Pages API client
//!
//! Direct Cloudflare API implementation for reading Pages deployments.
//! Uses Bearer token authentication; the JSON response is parsed and
//! filtered in process.

use crate::error::{CloudflareError, Result};
use deploywatch_core::RawStatusSnapshot;
use serde::Deserialize;
use std::time::Duration;

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";
const DASHBOARD_BASE: &str = "https://dash.cloudflare.com";
const USER_AGENT: &str = concat!("deploywatch/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Pages client
#[derive(Debug, Clone)]
pub struct PagesConfig {
    pub account_id: String,
    pub api_token: String,
    /// API base URL, without trailing slash
    pub api_base: String,
}

impl PagesConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            api_base: CLOUDFLARE_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

/// A Pages deployment reduced to the fields deploywatch cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagesDeployment {
    pub id: String,
    pub project_name: Option<String>,
    pub environment: Option<String>,
    /// First alias when present, otherwise the unique deployment URL
    pub url: Option<String>,
    pub stage: String,
    pub status: String,
    pub commit_hash: Option<String>,
}

impl PagesDeployment {
    pub fn into_snapshot(self) -> RawStatusSnapshot {
        RawStatusSnapshot {
            stage: self.stage,
            status: self.status,
            url: self.url,
            id: Some(self.id),
        }
    }
}

/// Cloudflare Pages client
pub struct CloudflarePages {
    client: reqwest::Client,
    account_id: String,
    api_token: String,
    api_base: String,
}

impl CloudflarePages {
    /// Create a new Pages client
    pub fn new(config: PagesConfig) -> Result<Self> {
        if config.account_id.trim().is_empty() {
            return Err(CloudflareError::InvalidConfig(
                "account id must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            account_id: config.account_id,
            api_token: config.api_token,
            api_base: config.api_base,
        })
    }

    /// Endpoint listing the deployments of a project
    pub fn deployments_url(&self, project_name: &str) -> String {
        format!(
            "{}/accounts/{}/pages/projects/{}/deployments",
            self.api_base, self.account_id, project_name
        )
    }

    /// Dashboard page of a single deployment
    pub fn dashboard_url(project_name: &str, deployment_id: &str) -> String {
        format!(
            "{}?to=/:account/pages/view/{}/{}",
            DASHBOARD_BASE, project_name, deployment_id
        )
    }

    /// List the most recent deployments of a project
    pub async fn list_deployments(&self, project_name: &str) -> Result<Vec<PagesDeployment>> {
        let url = self.deployments_url(project_name);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_deployments(status, &body)
    }

    /// Find the deployment triggered by `commit_hash`
    pub async fn find_deployment(
        &self,
        project_name: &str,
        commit_hash: &str,
    ) -> Result<PagesDeployment> {
        let deployments = self.list_deployments(project_name).await?;
        tracing::debug!(
            "{} deployments listed for {}",
            deployments.len(),
            project_name
        );

        select_for_commit(deployments, commit_hash).ok_or_else(|| {
            CloudflareError::DeploymentNotFound {
                project: project_name.to_string(),
                commit: commit_hash.to_string(),
            }
        })
    }
}

/// Pick the deployment whose trigger metadata names `commit_hash`
///
/// The API lists newest first, so the first match is the latest attempt.
pub fn select_for_commit(
    deployments: impl IntoIterator<Item = PagesDeployment>,
    commit_hash: &str,
) -> Option<PagesDeployment> {
    deployments
        .into_iter()
        .find(|d| d.commit_hash.as_deref() == Some(commit_hash))
}

/// Decode a deployments list response body
pub fn parse_deployments(status: reqwest::StatusCode, body: &str) -> Result<Vec<PagesDeployment>> {
    let api_response: ApiResponse<Vec<ApiDeployment>> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(CloudflareError::ApiError(format!("HTTP {}", status)));
        }
        Err(e) => return Err(e.into()),
    };

    if !api_response.success || !status.is_success() {
        let error_msg = api_response
            .errors
            .first()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .unwrap_or_else(|| format!("Unknown error (HTTP {})", status));
        return Err(CloudflareError::ApiError(error_msg));
    }

    Ok(api_response
        .result
        .unwrap_or_default()
        .into_iter()
        .map(ApiDeployment::into_deployment)
        .collect())
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiDeployment {
    id: String,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    environment: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    aliases: Option<Vec<String>>,
    #[serde(default)]
    latest_stage: Option<ApiStage>,
    #[serde(default)]
    deployment_trigger: Option<ApiTrigger>,
}

#[derive(Debug, Deserialize)]
struct ApiStage {
    name: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ApiTrigger {
    #[serde(default)]
    metadata: Option<ApiTriggerMetadata>,
}

#[derive(Debug, Deserialize)]
struct ApiTriggerMetadata {
    #[serde(default)]
    commit_hash: Option<String>,
}

impl ApiDeployment {
    fn into_deployment(self) -> PagesDeployment {
        let url = self
            .aliases
            .and_then(|aliases| aliases.into_iter().next())
            .or(self.url);
        let (stage, status) = self
            .latest_stage
            .map(|s| (s.name, s.status))
            .unwrap_or_default();
        let commit_hash = self
            .deployment_trigger
            .and_then(|t| t.metadata)
            .and_then(|m| m.commit_hash);

        PagesDeployment {
            id: self.id,
            project_name: self.project_name,
            environment: self.environment,
            url,
            stage,
            status,
            commit_hash,
        }
    }
}
