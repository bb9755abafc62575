//! GitHub integration for deploywatch
//!
//! - [`GithubDeploymentStatus`]: a `StatusSink` posting to the deployment
//!   statuses API
//! - [`ActionsOutput`]: an `OutputEmitter` writing GitHub Actions step outputs
//!
//! # Example
//!
//! ```ignore
//! use deploywatch_github::{ActionsOutput, GithubConfig, GithubDeploymentStatus};
//!
//! let config = GithubConfig::new("owner/repo", "123456", token)?;
//! let sink = GithubDeploymentStatus::new(config)?;
//! let mut outputs = ActionsOutput::from_env();
//! ```

pub mod deployments;
pub mod error;
pub mod output;

pub use deployments::{GITHUB_API_BASE, GithubConfig, GithubDeploymentStatus, github_state};
pub use error::{GithubError, Result};
pub use output::ActionsOutput;
