//! Cloudflare Pages provider for deploywatch
//!
//! This crate implements the `StatusProvider` trait for Cloudflare Pages,
//! letting deploywatch follow a Pages deployment from build to deploy.
//!
//! # Requirements
//!
//! - `CLOUDFLARE_ACCOUNT_ID` and `CLOUDFLARE_API_TOKEN` (Pages read access)
//!
//! # Example
//!
//! ```ignore
//! use deploywatch_cloudflare::{CloudflarePagesProvider, PagesConfig};
//! use deploywatch_core::{DeploymentIdentity, StatusProvider};
//!
//! let config = PagesConfig::new("account-id", "api-token");
//! let provider = CloudflarePagesProvider::new(config);
//!
//! let identity = DeploymentIdentity::new("my-site", "0123abcd", "42");
//! let snapshot = provider.fetch_status(&identity).await?;
//! println!("{} {}", snapshot.stage, snapshot.status);
//! ```

pub mod error;
pub mod pages;
pub mod provider;

pub use error::{CloudflareError, Result};
pub use pages::{CloudflarePages, PagesConfig, PagesDeployment};
pub use provider::CloudflarePagesProvider;
