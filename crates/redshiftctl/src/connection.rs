//! Execution settings and client management for Redshift commands

use std::path::PathBuf;

use anyhow::Context;
use redshiftctl_core::{Config, ExecutionSettings, SdkClientPool};
use tracing::{debug, info, trace};

use crate::cli::Cli;
use crate::error::Result as CliResult;
use crate::resilience::{apply_cli_overrides, has_cli_overrides};

/// Owns the loaded configuration and the client pool shared by all commands
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub pool: SdkClientPool,
}

impl ConnectionManager {
    /// Create a new connection manager with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_config_path(config, None)
    }

    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            pool: SdkClientPool::new(),
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            self.config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Path the configuration is read from and written to
    pub fn config_file(&self) -> CliResult<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Settings for one invocation
    ///
    /// Precedence: command-line flags (and their `REDSHIFTCTL_*` environment
    /// variables), then the resolved profile, then the SDK's own defaults.
    pub fn execution_settings(&self, cli: &Cli) -> CliResult<ExecutionSettings> {
        let profile = self.config.resolve_profile(cli.profile.as_deref())?;

        let mut settings = match profile {
            Some((name, profile)) => {
                info!("Using profile: {}", name);
                profile.execution_settings(name)?
            }
            None => {
                debug!("No profile configured; using SDK defaults");
                ExecutionSettings::default()
            }
        };

        if let Some(region) = &cli.region {
            debug!("Region override: {}", region);
            settings.region = Some(region.clone());
        }
        if let Some(endpoint_url) = &cli.endpoint_url {
            debug!("Endpoint override: {}", endpoint_url);
            settings.endpoint_url = Some(endpoint_url.clone());
        }

        if has_cli_overrides(cli.no_retry, cli.retry_attempts, cli.timeout) {
            let mut resilience = profile
                .and_then(|(_, profile)| profile.resilience.clone())
                .unwrap_or_default();
            apply_cli_overrides(&mut resilience, cli.no_retry, cli.retry_attempts, cli.timeout);
            resilience.apply_to(&mut settings);
        }

        debug!(
            "Endpoint: {}, credentials: {}",
            settings.endpoint_description(),
            settings.credentials.describe()
        );
        trace!("Execution settings: {:?}", settings);
        Ok(settings)
    }
}
