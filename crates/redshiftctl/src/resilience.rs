//! Command-line overrides for SDK retry and timeout settings

use redshiftctl_core::ResilienceConfig;

/// Apply CLI overrides to a profile's resilience configuration
pub fn apply_cli_overrides(
    config: &mut ResilienceConfig,
    no_retry: bool,
    retry_attempts: Option<u32>,
    timeout_secs: Option<u64>,
) {
    if no_retry {
        config.retry.enabled = false;
    }

    if let Some(attempts) = retry_attempts {
        config.retry.max_attempts = attempts;
        config.retry.enabled = true; // Enable if explicitly set
    }

    if let Some(secs) = timeout_secs {
        config.timeout.operation_timeout_secs = Some(secs);
    }
}

/// True when any resilience flag was passed
pub fn has_cli_overrides(
    no_retry: bool,
    retry_attempts: Option<u32>,
    timeout: Option<u64>,
) -> bool {
    no_retry || retry_attempts.is_some() || timeout.is_some()
}
