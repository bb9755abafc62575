//! deploywatch core
//!
//! This crate provides the provider-independent half of deploywatch:
//! the canonical deployment state model, the status mapper, the
//! provider/sink/output abstractions and the reconciliation loop that ties
//! them together.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                deploywatch CLI                   │
//! │        (config from env, exit code mapping)      │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               deploywatch-core                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   Reconciler: poll → classify → report    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ StatusMapper │  │ OutputEmitter│            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │  cloudflare   │ │    github     │
//! │   provider    │ │     sink      │
//! └───────────────┘ └───────────────┘
//! ```

pub mod error;
pub mod mapper;
pub mod model;
pub mod output;
pub mod provider;
pub mod reconcile;

// Re-exports
pub use error::{CoreError, Result};
pub use mapper::{StatusVocabulary, classify};
pub use model::{
    DeploymentIdentity, PollConfig, RawStatusSnapshot, ReconciliationState, StatusReport,
};
pub use output::{OutputEmitter, emit_deployment_outputs};
pub use provider::{StatusProvider, StatusSink};
pub use reconcile::{ReconcileOutcome, Reconciler};
