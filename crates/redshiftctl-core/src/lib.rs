//! # redshiftctl-core
//!
//! Shared engine behind the `redshiftctl` CLI. Every Redshift management
//! operation runs through the same pipeline:
//!
//! ```text
//! ParameterContext ──► ConfirmationGate ──► build_request ──► RedshiftApi ──► OutputEnvelope
//!                      (mutating only)
//! ```
//!
//! - [`context`] - per-invocation parameters and execution settings
//! - [`confirm`] - force-or-prompt confirmation for mutating operations
//! - [`operation`] - the [`Operation`] descriptor implemented once per API call
//! - [`operations`] - descriptors and parameter structs for each supported call
//! - [`executor`] - runs a descriptor against a client and captures the outcome
//! - [`envelope`] - the uniform success/failure/cancelled result wrapper
//! - [`api`] - the remote client seam and its AWS SDK implementation
//! - [`config`] - profiles and the on-disk configuration file
//!
//! ## Example
//!
//! ```rust,ignore
//! use redshiftctl_core::{Executor, ParameterContext, ExecutionSettings, SdkClientPool};
//! use redshiftctl_core::operations::{ClusterParams, RebootCluster};
//!
//! let pool = SdkClientPool::new();
//! let executor = Executor::new(&pool, &prompt);
//! let context = ParameterContext::new(
//!     ClusterParams::new().with_cluster_identifier("analytics"),
//!     ExecutionSettings::default().with_region("us-east-1"),
//! )
//! .with_force(true);
//!
//! let envelope = executor.execute::<RebootCluster>(context).await;
//! ```

pub mod api;
pub mod config;
pub mod confirm;
pub mod context;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod operation;
pub mod operations;

pub use api::{ApiError, ApiResult, RedshiftApi, Reply, SdkClientPool, SdkRedshiftClient};
pub use config::{Config, ConfigError, Profile, ResilienceConfig};
pub use confirm::{Confirm, ConfirmationGate};
pub use context::{CredentialSource, ExecutionSettings, ParameterContext};
pub use envelope::{Emission, Outcome, OutputEnvelope, Selection};
pub use error::{CoreError, Result};
pub use executor::{ClientProvider, Executor};
pub use operation::Operation;
