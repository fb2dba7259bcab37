//! Retry and timeout settings stored per profile
//!
//! These map onto the AWS SDK's own retry and timeout configuration; the
//! engine never retries on its own.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::context::ExecutionSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResilienceConfig {
    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub timeout: TimeoutConfig,
}

/// SDK retry policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Whether the SDK may retry at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            initial_backoff_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Overall operation timeout in seconds, covering all attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_timeout_secs: Option<u64>,
}

impl ResilienceConfig {
    /// Attempt budget handed to the SDK; `1` when retries are disabled
    pub fn effective_max_attempts(&self) -> u32 {
        if self.retry.enabled {
            self.retry.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Copy retry and timeout settings into `settings`
    pub fn apply_to(&self, settings: &mut ExecutionSettings) {
        settings.max_attempts = Some(self.effective_max_attempts());
        settings.initial_backoff = Some(Duration::from_millis(self.retry.initial_backoff_ms));
        settings.operation_timeout = self.timeout.operation_timeout_secs.map(Duration::from_secs);
    }
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}
