//! Cloudflare Pages status provider implementation

use crate::pages::{CloudflarePages, PagesConfig};
use async_trait::async_trait;
use deploywatch_core::{DeploymentIdentity, RawStatusSnapshot, StatusProvider, StatusVocabulary};

/// Cloudflare Pages provider
pub struct CloudflarePagesProvider {
    pages: CloudflarePages,
    vocabulary: StatusVocabulary,
}

impl CloudflarePagesProvider {
    pub fn new(config: PagesConfig) -> crate::Result<Self> {
        Ok(Self {
            pages: CloudflarePages::new(config)?,
            vocabulary: Self::pages_vocabulary(),
        })
    }

    /// Stage/status labels of the Pages deployment pipeline
    ///
    /// `latest_stage.status` is one of idle, active, success, failure,
    /// canceled. "failed" is accepted as well.
    pub fn pages_vocabulary() -> StatusVocabulary {
        StatusVocabulary::new("deploy", "success", ["failure", "failed"])
    }
}

#[async_trait]
impl StatusProvider for CloudflarePagesProvider {
    fn name(&self) -> &str {
        "cloudflare-pages"
    }

    fn display_name(&self) -> &str {
        "Cloudflare Pages"
    }

    fn vocabulary(&self) -> &StatusVocabulary {
        &self.vocabulary
    }

    fn log_url(&self, identity: &DeploymentIdentity, deployment_id: &str) -> Option<String> {
        Some(CloudflarePages::dashboard_url(
            &identity.project_name,
            deployment_id,
        ))
    }

    async fn fetch_status(
        &self,
        identity: &DeploymentIdentity,
    ) -> deploywatch_core::Result<RawStatusSnapshot> {
        let deployment = self
            .pages
            .find_deployment(&identity.project_name, &identity.commit_hash)
            .await?;

        Ok(deployment.into_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploywatch_core::{ReconciliationState, classify};

    fn provider() -> CloudflarePagesProvider {
        CloudflarePagesProvider::new(PagesConfig::new("acc", "token")).unwrap()
    }

    #[test]
    fn test_names() {
        let provider = provider();
        assert_eq!(provider.name(), "cloudflare-pages");
        assert_eq!(provider.display_name(), "Cloudflare Pages");
    }

    #[test]
    fn test_log_url_uses_project_and_deployment() {
        let identity = DeploymentIdentity::new("site", "c0ffee", "7");
        assert_eq!(
            provider().log_url(&identity, "abc").as_deref(),
            Some("https://dash.cloudflare.com?to=/:account/pages/view/site/abc")
        );
    }

    #[test]
    fn test_pages_vocabulary() {
        let vocabulary = CloudflarePagesProvider::pages_vocabulary();
        let cases = [
            ("queued", "idle", ReconciliationState::InProgress),
            ("build", "active", ReconciliationState::InProgress),
            ("build", "success", ReconciliationState::InProgress),
            ("build", "failure", ReconciliationState::Failed),
            ("deploy", "active", ReconciliationState::InProgress),
            ("deploy", "failed", ReconciliationState::Failed),
            ("deploy", "success", ReconciliationState::Succeeded),
        ];
        for (stage, status, expected) in cases {
            let snapshot = RawStatusSnapshot::new(stage, status);
            assert_eq!(classify(&snapshot, &vocabulary), expected, "{stage}/{status}");
        }
    }

    #[tokio::test]
    async fn test_unreachable_api_is_provider_error() {
        let config = PagesConfig::new("acc", "token").with_api_base("http://127.0.0.1:9");
        let provider = CloudflarePagesProvider::new(config).unwrap();
        let identity = DeploymentIdentity::new("site", "c0ffee", "7");

        let err = provider.fetch_status(&identity).await.unwrap_err();
        assert!(matches!(err, deploywatch_core::CoreError::ProviderError(_)));
    }
}
