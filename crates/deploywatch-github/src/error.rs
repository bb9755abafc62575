//! GitHub sink error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("GitHub API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<GithubError> for deploywatch_core::CoreError {
    fn from(e: GithubError) -> Self {
        deploywatch_core::CoreError::SinkError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GithubError>;
