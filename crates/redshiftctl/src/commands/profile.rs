//! Profile management command implementations

use colored::Colorize;
use redshiftctl_core::config::CredentialStore;
use redshiftctl_core::{Profile, ResilienceConfig};
use serde_json::json;
use tracing::{debug, info, trace};

use crate::cli::{OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::RedshiftCtlError;
use crate::output;
use crate::resilience::{apply_cli_overrides, has_cli_overrides};

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &mut ConnectionManager,
    output_format: OutputFormat,
) -> Result<(), RedshiftCtlError> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, output_format),
        Path => handle_path(conn_mgr, output_format),
        Show { name } => handle_show(conn_mgr, name, output_format),
        Set {
            name,
            region,
            endpoint_url,
            aws_profile,
            access_key_id,
            secret_access_key,
            session_token,
            no_retry,
            retry_attempts,
            timeout,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            #[cfg(feature = "secure-storage")]
            let store = if *use_keyring {
                CredentialStore::new()
            } else {
                CredentialStore::plaintext()
            };
            #[cfg(not(feature = "secure-storage"))]
            let store = CredentialStore::plaintext();

            let update = ProfileUpdate {
                region: region.clone(),
                endpoint_url: endpoint_url.clone(),
                aws_profile: aws_profile.clone(),
                access_key_id: access_key_id.clone(),
                secret_access_key: secret_access_key.clone(),
                session_token: session_token.clone(),
                no_retry: *no_retry,
                retry_attempts: *retry_attempts,
                timeout: *timeout,
            };
            handle_set(conn_mgr, name, update, &store)
        }
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
    }
}

/// Fields supplied to `profile set`
#[derive(Debug, Default)]
struct ProfileUpdate {
    region: Option<String>,
    endpoint_url: Option<String>,
    aws_profile: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    no_retry: bool,
    retry_attempts: Option<u32>,
    timeout: Option<u64>,
}

fn print_structured(
    data: &serde_json::Value,
    output_format: OutputFormat,
) -> Result<(), RedshiftCtlError> {
    output::print_output(data, output_format, None).map_err(|e| RedshiftCtlError::OutputError {
        message: format!("{:#}", e),
    })
}

fn handle_list(
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
) -> Result<(), RedshiftCtlError> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());
    let default_profile = conn_mgr.config.default_profile.as_deref();
    let config_path = conn_mgr.config_file()?;

    match output_format {
        OutputFormat::Auto => {
            println!("Configuration file: {}", config_path.display());
            println!();

            if profiles.is_empty() {
                info!("No profiles configured");
                println!("No profiles configured.");
                println!("Use 'redshiftctl profile set' to create a profile.");
                return Ok(());
            }

            for (name, profile) in &profiles {
                if default_profile == Some(name.as_str()) {
                    println!("  {} {}", name.bold().cyan(), "(default)".green());
                } else {
                    println!("  {}", name.bold().cyan());
                }
                if let Some(region) = &profile.region {
                    println!("    {} {}", "Region:".dimmed(), region);
                }
                if let Some(endpoint_url) = &profile.endpoint_url {
                    println!("    {} {}", "Endpoint:".dimmed(), endpoint_url);
                }
            }
        }
        _ => {
            let profile_list: Vec<serde_json::Value> = profiles
                .iter()
                .map(|(name, profile)| {
                    json!({
                        "name": name,
                        "is_default": default_profile == Some(name.as_str()),
                        "region": profile.region,
                        "endpoint_url": profile.endpoint_url,
                    })
                })
                .collect();

            let output_data = json!({
                "config_path": config_path.to_string_lossy(),
                "profiles": profile_list,
                "count": profiles.len()
            });
            print_structured(&output_data, output_format)?;
        }
    }

    Ok(())
}

fn handle_path(
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
) -> Result<(), RedshiftCtlError> {
    let config_path = conn_mgr.config_file()?;

    match output_format {
        OutputFormat::Auto => println!("{}", config_path.display()),
        _ => print_structured(
            &json!({ "config_path": config_path.to_string_lossy() }),
            output_format,
        )?,
    }
    Ok(())
}

/// Hide stored secrets; keyring references are shown as-is
fn mask_secret(value: &str) -> String {
    if CredentialStore::is_keyring_reference(value) {
        value.to_string()
    } else if value.chars().count() > 4 {
        format!("{}****", value.chars().take(4).collect::<String>())
    } else {
        "****".to_string()
    }
}

fn profile_summary(name: &str, profile: &Profile, is_default: bool) -> serde_json::Value {
    let resilience = profile.resilience.clone().unwrap_or_default();
    json!({
        "name": name,
        "is_default": is_default,
        "region": profile.region,
        "endpoint_url": profile.endpoint_url,
        "aws_profile": profile.aws_profile,
        "access_key_id": profile.access_key_id.as_deref().map(mask_secret),
        "secret_access_key": profile.secret_access_key.as_deref().map(mask_secret),
        "session_token": profile.session_token.as_deref().map(mask_secret),
        "max_attempts": resilience.effective_max_attempts(),
        "operation_timeout_secs": resilience.timeout.operation_timeout_secs,
    })
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: &str,
    output_format: OutputFormat,
) -> Result<(), RedshiftCtlError> {
    debug!("Showing profile: {}", name);
    let profile = conn_mgr
        .config
        .profiles
        .get(name)
        .ok_or_else(|| RedshiftCtlError::ProfileNotFound { name: name.into() })?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    let summary = profile_summary(name, profile, is_default);

    if output_format != OutputFormat::Auto {
        return print_structured(&summary, output_format);
    }

    println!("{}: {}", "Profile".bold(), name.cyan());
    if is_default {
        println!("{}: yes", "Default".bold());
    }
    println!(
        "{}: {}",
        "Region".bold(),
        profile.region.as_deref().unwrap_or("(from environment)")
    );
    if let Some(endpoint_url) = &profile.endpoint_url {
        println!("{}: {}", "Endpoint".bold(), endpoint_url);
    }
    let credentials = if let Some(aws_profile) = &profile.aws_profile {
        format!("shared profile '{}'", aws_profile)
    } else if let Some(access_key_id) = &profile.access_key_id {
        format!("static keys ({})", mask_secret(access_key_id))
    } else {
        "default provider chain".to_string()
    };
    println!("{}: {}", "Credentials".bold(), credentials);
    println!(
        "{}: {}",
        "Max attempts".bold(),
        summary["max_attempts"]
    );
    if let Some(secs) = summary["operation_timeout_secs"].as_u64() {
        println!("{}: {}s", "Timeout".bold(), secs);
    }
    Ok(())
}

fn handle_set(
    conn_mgr: &mut ConnectionManager,
    name: &str,
    update: ProfileUpdate,
    store: &CredentialStore,
) -> Result<(), RedshiftCtlError> {
    debug!(
        "Setting profile {} (credential storage: {})",
        name,
        store.storage_backend()
    );

    let mut profile = conn_mgr.config.profiles.get(name).cloned().unwrap_or_default();
    let creating = !conn_mgr.config.profiles.contains_key(name);

    if update.region.is_some() {
        profile.region = update.region;
    }
    if update.endpoint_url.is_some() {
        profile.endpoint_url = update.endpoint_url;
    }
    if let Some(aws_profile) = update.aws_profile {
        profile.aws_profile = Some(aws_profile);
        profile.access_key_id = None;
        profile.secret_access_key = None;
        profile.session_token = None;
    }
    if let (Some(access_key_id), Some(secret_access_key)) =
        (update.access_key_id, update.secret_access_key)
    {
        profile.aws_profile = None;
        profile.access_key_id =
            Some(store.store_credential(&format!("{}-access-key-id", name), &access_key_id)?);
        profile.secret_access_key = Some(
            store.store_credential(&format!("{}-secret-access-key", name), &secret_access_key)?,
        );
        profile.session_token = update
            .session_token
            .map(|token| store.store_credential(&format!("{}-session-token", name), &token))
            .transpose()?;
    }
    if has_cli_overrides(update.no_retry, update.retry_attempts, update.timeout) {
        let mut resilience: ResilienceConfig = profile.resilience.take().unwrap_or_default();
        apply_cli_overrides(
            &mut resilience,
            update.no_retry,
            update.retry_attempts,
            update.timeout,
        );
        profile.resilience = Some(resilience);
    }

    // Reject half-configured credentials before writing anything
    profile.resolve_credentials(name)?;

    conn_mgr.config.set_profile(name.to_string(), profile);
    if conn_mgr.config.profiles.len() == 1 && conn_mgr.config.default_profile.is_none() {
        conn_mgr.config.default_profile = Some(name.to_string());
    }
    conn_mgr.save_config()?;

    if creating {
        println!("Profile '{}' created successfully.", name);
    } else {
        println!("Profile '{}' updated successfully.", name);
    }
    Ok(())
}

fn handle_remove(conn_mgr: &mut ConnectionManager, name: &str) -> Result<(), RedshiftCtlError> {
    debug!("Removing profile: {}", name);

    let was_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    let removed = conn_mgr
        .config
        .remove_profile(name)
        .ok_or_else(|| RedshiftCtlError::ProfileNotFound { name: name.into() })?;

    let store = CredentialStore::plaintext();
    for value in removed.secret_values() {
        store.delete_credential(value)?;
    }

    conn_mgr.save_config()?;

    println!("Profile '{}' removed successfully.", name);
    if was_default {
        println!("Default profile cleared.");
    }
    Ok(())
}

fn handle_default(conn_mgr: &mut ConnectionManager, name: &str) -> Result<(), RedshiftCtlError> {
    debug!("Setting default profile: {}", name);

    if !conn_mgr.config.profiles.contains_key(name) {
        return Err(RedshiftCtlError::ProfileNotFound { name: name.into() });
    }

    conn_mgr.config.default_profile = Some(name.to_string());
    conn_mgr.save_config()?;

    println!("Default profile set to '{}'.", name);
    Ok(())
}
