//! Configuration file handling
//!
//! Configuration is stored in TOML with any number of named profiles. A
//! profile pins the region, an optional endpoint override, how credentials are
//! obtained, and the SDK retry/timeout policy.
//!
//! ```toml
//! default_profile = "prod"
//!
//! [profiles.prod]
//! region = "us-east-1"
//! aws_profile = "prod-admin"
//!
//! [profiles.local]
//! region = "us-east-1"
//! endpoint_url = "http://localhost:4566"
//! access_key_id = "test"
//! secret_access_key = "${LOCAL_SECRET:-test}"
//!
//! [profiles.local.resilience.retry]
//! enabled = false
//! ```

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use super::resilience::ResilienceConfig;
use crate::context::{CredentialSource, ExecutionSettings};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Profile used when `--profile` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Named profile from the shared AWS config files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_profile: Option<String>,
    /// Static access key; supports `keyring:` references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    /// Static secret key; supports `keyring:` references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resilience: Option<ResilienceConfig>,
}

impl Profile {
    /// Check if this profile carries static keys
    pub fn has_static_keys(&self) -> bool {
        self.access_key_id.is_some() || self.secret_access_key.is_some()
    }

    /// Work out where credentials come from, resolving keyring references
    ///
    /// `REDSHIFTCTL_ACCESS_KEY_ID`, `REDSHIFTCTL_SECRET_ACCESS_KEY` and
    /// `REDSHIFTCTL_SESSION_TOKEN` override stored static keys.
    pub fn resolve_credentials(&self, name: &str) -> Result<CredentialSource> {
        self.expanded().credential_source(name)
    }

    /// Copy of this profile with `${VAR}` references expanded
    ///
    /// The stored profile keeps its references; saved files never contain
    /// expanded values.
    pub fn expanded(&self) -> Profile {
        let expand = |value: &Option<String>| value.as_deref().map(expand_env_vars);
        Profile {
            region: expand(&self.region),
            endpoint_url: expand(&self.endpoint_url),
            aws_profile: expand(&self.aws_profile),
            access_key_id: expand(&self.access_key_id),
            secret_access_key: expand(&self.secret_access_key),
            session_token: expand(&self.session_token),
            resilience: self.resilience.clone(),
        }
    }

    fn credential_source(&self, name: &str) -> Result<CredentialSource> {
        let invalid = |reason: &str| ConfigError::InvalidCredentials {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match (
            &self.aws_profile,
            &self.access_key_id,
            &self.secret_access_key,
        ) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(invalid(
                "set either aws_profile or access_key_id/secret_access_key, not both",
            )),
            (Some(aws_profile), None, None) => Ok(CredentialSource::Profile(aws_profile.clone())),
            (None, Some(access_key_id), Some(secret_access_key)) => {
                let store = CredentialStore::new();

                let access_key_id = store
                    .get_credential(access_key_id, Some("REDSHIFTCTL_ACCESS_KEY_ID"))
                    .map_err(|e| {
                        ConfigError::CredentialError(format!(
                            "Failed to resolve access key id: {}",
                            e
                        ))
                    })?;
                let secret_access_key = store
                    .get_credential(secret_access_key, Some("REDSHIFTCTL_SECRET_ACCESS_KEY"))
                    .map_err(|e| {
                        ConfigError::CredentialError(format!(
                            "Failed to resolve secret access key: {}",
                            e
                        ))
                    })?;
                let session_token = self
                    .session_token
                    .as_ref()
                    .map(|token| {
                        store
                            .get_credential(token, Some("REDSHIFTCTL_SESSION_TOKEN"))
                            .map_err(|e| {
                                ConfigError::CredentialError(format!(
                                    "Failed to resolve session token: {}",
                                    e
                                ))
                            })
                    })
                    .transpose()?;

                Ok(CredentialSource::Static {
                    access_key_id,
                    secret_access_key,
                    session_token,
                })
            }
            (None, Some(_), None) => Err(invalid("access_key_id is set without secret_access_key")),
            (None, None, Some(_)) => Err(invalid("secret_access_key is set without access_key_id")),
            (None, None, None) => Ok(CredentialSource::Default),
        }
    }

    /// Execution settings described by this profile
    pub fn execution_settings(&self, name: &str) -> Result<ExecutionSettings> {
        let profile = self.expanded();
        let mut settings = ExecutionSettings {
            credentials: profile.credential_source(name)?,
            region: profile.region,
            endpoint_url: profile.endpoint_url,
            ..Default::default()
        };
        if let Some(resilience) = &self.resilience {
            resilience.apply_to(&mut settings);
        }
        Ok(settings)
    }

    /// Every stored secret value, for keyring cleanup
    pub fn secret_values(&self) -> impl Iterator<Item = &str> {
        [
            self.access_key_id.as_deref(),
            self.secret_access_key.as_deref(),
            self.session_token.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

impl Config {
    /// Resolve which profile to use
    ///
    /// Resolution order:
    /// 1. The explicitly named profile (must exist)
    /// 2. `default_profile` (must exist)
    /// 3. The only profile, when exactly one is configured
    /// 4. None; the SDK's own defaults apply
    pub fn resolve_profile(
        &self,
        explicit_profile: Option<&str>,
    ) -> Result<Option<(&str, &Profile)>> {
        let name = match explicit_profile.or(self.default_profile.as_deref()) {
            Some(name) => name,
            None => {
                if self.profiles.len() == 1 {
                    return Ok(self
                        .profiles
                        .iter()
                        .next()
                        .map(|(name, profile)| (name.as_str(), profile)));
                }
                return Ok(None);
            }
        };

        self.profiles
            .get_key_value(name)
            .map(|(name, profile)| Some((name.as_str(), profile)))
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // `${VAR}` references stay unexpanded here; see `Profile::expanded`
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/redshiftctl/config.toml` is preferred when it (or
    /// its directory) exists, falling back to
    /// `~/Library/Application Support/com.redshiftctl.redshiftctl/config.toml`.
    ///
    /// On Linux: `~/.config/redshiftctl/config.toml`
    /// On Windows: `%APPDATA%\redshiftctl\redshiftctl\config\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("redshiftctl")
                    .join("config.toml");

                if linux_style_path.exists()
                    || linux_style_path
                        .parent()
                        .map(|p| p.exists())
                        .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("com", "redshiftctl", "redshiftctl")
            .ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references
///
/// Unset variables without a default are left as written.
fn expand_env_vars(value: &str) -> String {
    shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).to_string()
}
