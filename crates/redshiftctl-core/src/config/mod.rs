//! Configuration and profile management for redshiftctl
//!
// Nested config module mirrors the file name on disk

#![allow(clippy::module_inception)]
//!
//! - Multiple named profiles, each pinning a region, endpoint and credentials
//! - Secure credential storage using the OS keyring (optional)
//! - Environment variable expansion in the config file
//! - Platform-specific config file locations

pub mod config;
pub mod credential;
pub mod error;
pub mod resilience;

pub use config::{Config, Profile};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
pub use resilience::ResilienceConfig;
