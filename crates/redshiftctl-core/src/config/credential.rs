//! Credential storage with optional keyring support
//!
//! Secret values in a profile are either plaintext or a `keyring:<key>`
//! reference into the OS keyring. Environment variables override both.

use super::error::{ConfigError, Result};
use std::env;

/// Prefix that marks a value as a keyring reference
const KEYRING_PREFIX: &str = "keyring:";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "redshiftctl";

/// Storage backend for credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    #[cfg(feature = "secure-storage")]
    Keyring,
    Plaintext,
}

pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Use the keyring when it is compiled in and reachable, plaintext otherwise
    pub fn new() -> Self {
        #[cfg(feature = "secure-storage")]
        {
            if Self::is_keyring_available() {
                return Self {
                    storage: CredentialStorage::Keyring,
                };
            }
        }

        Self {
            storage: CredentialStorage::Plaintext,
        }
    }

    /// Store values as given, never touching the keyring
    pub fn plaintext() -> Self {
        Self {
            storage: CredentialStorage::Plaintext,
        }
    }

    #[cfg(feature = "secure-storage")]
    fn is_keyring_available() -> bool {
        match keyring::Entry::new(SERVICE_NAME, "__probe__") {
            Ok(entry) => {
                let _ = entry.get_password();
                true
            }
            Err(_) => false,
        }
    }

    /// Store a credential and return the value to write into the config file
    ///
    /// With the keyring backend this is a `keyring:<key>` reference; otherwise
    /// the value itself.
    pub fn store_credential(&self, key: &str, value: &str) -> Result<String> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
                entry.set_password(value).map_err(|e| {
                    ConfigError::KeyringError(format!(
                        "Failed to store credential in keyring: {}",
                        e
                    ))
                })?;
                Ok(format!("{}{}", KEYRING_PREFIX, key))
            }
            CredentialStorage::Plaintext => {
                let _ = key;
                Ok(value.to_string())
            }
        }
    }

    /// Resolve a stored value
    ///
    /// Resolution order:
    /// 1. Environment variable (if `env_var` is given and set)
    /// 2. Keyring, when the value is a `keyring:` reference
    /// 3. The value itself
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(env_value) = env::var(var)
        {
            return Ok(env_value);
        }

        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.to_string());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            entry.get_password().map_err(|e| {
                ConfigError::KeyringError(format!(
                    "Failed to retrieve credential '{}' from keyring: {}",
                    key, e
                ))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::CredentialError(format!(
                "Credential '{}' references the keyring but secure-storage is not enabled",
                key
            )))
        }
    }

    /// Remove the keyring entry behind a stored value; plaintext values are ignored
    pub fn delete_credential(&self, value: &str) -> Result<()> {
        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::KeyringError(format!(
                    "Failed to delete credential from keyring: {}",
                    e
                ))),
            }
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            let _ = key;
            Ok(())
        }
    }

    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }

    pub fn storage_backend(&self) -> &'static str {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => "keyring",
            CredentialStorage::Plaintext => "plaintext",
        }
    }
}
