//! Core error types

use thiserror::Error;

/// Errors raised by providers, sinks and output emitters
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Sink error: {0}")]
    SinkError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
