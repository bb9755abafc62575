//! Cloudflare provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("No deployment of project {project} for commit {commit} yet")]
    DeploymentNotFound { project: String, commit: String },

    #[error("Cloudflare API error: {0}")]
    ApiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<CloudflareError> for deploywatch_core::CoreError {
    fn from(e: CloudflareError) -> Self {
        deploywatch_core::CoreError::ProviderError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CloudflareError>;
