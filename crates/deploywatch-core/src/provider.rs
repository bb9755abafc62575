//! Status provider and status sink trait definitions

use crate::error::Result;
use crate::mapper::StatusVocabulary;
use crate::model::{DeploymentIdentity, RawStatusSnapshot, StatusReport};
use async_trait::async_trait;

/// Hosting provider that performs the deployment
///
/// Implementations (Cloudflare Pages, ...) fetch the latest raw status of the
/// deployment matching a [`DeploymentIdentity`].
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Returns the provider name (e.g., "cloudflare-pages")
    ///
    /// Also used as the prefix of the CI output names.
    fn name(&self) -> &str;

    /// Returns the provider display name used in status descriptions
    fn display_name(&self) -> &str;

    /// Stage/status labels this provider uses
    fn vocabulary(&self) -> &StatusVocabulary;

    /// Dashboard URL for a concrete deployment
    fn log_url(&self, identity: &DeploymentIdentity, deployment_id: &str) -> Option<String>;

    /// Fetch the latest snapshot of the deployment for `identity.commit_hash`
    ///
    /// Returns an error when no matching deployment exists yet.
    async fn fetch_status(&self, identity: &DeploymentIdentity) -> Result<RawStatusSnapshot>;
}

/// Best-effort receiver of status updates (e.g. GitHub deployment statuses)
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Returns the sink name (e.g., "github")
    fn name(&self) -> &str;

    /// Record one status update
    async fn publish_status(&self, report: &StatusReport) -> Result<()>;
}
