//! Profile management command implementations

use crate::cli::{OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::{AbiquoCtlError, Result as CliResult};
use crate::output::print_output;
use abiquo_core::Profile;
use abiquo_core::config::CredentialStore;
use serde::Serialize;
use tracing::{debug, trace};

#[derive(Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    url: &'a str,
    username: &'a str,
    password: &'static str,
    insecure: bool,
    default: bool,
}

impl<'a> ProfileSummary<'a> {
    fn new(name: &'a str, profile: &'a Profile, default: bool) -> Self {
        Self {
            name,
            url: &profile.url,
            username: &profile.username,
            password: password_display(profile),
            insecure: profile.insecure,
            default,
        }
    }
}

fn password_display(profile: &Profile) -> &'static str {
    match profile.password.as_deref() {
        None => "(from ABIQUO_PASSWORD)",
        Some(value) if CredentialStore::is_keyring_reference(value) => "(keyring)",
        Some(_) => "********",
    }
}

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
) -> CliResult<()> {
    use ProfileCommands::*;

    match profile_cmd {
        List => handle_list(conn_mgr, output_format),
        Path => handle_path(conn_mgr, output_format),
        Show { name } => handle_show(conn_mgr, name, output_format),
        Set {
            name,
            url,
            username,
            password,
            insecure,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            let mut profile = Profile::new(url, username).with_insecure(*insecure);
            if let Some(password) = password {
                #[cfg(feature = "secure-storage")]
                let password = if *use_keyring {
                    CredentialStore::with_keyring()
                        .store_credential(&format!("{}-password", name), password)?
                } else {
                    password.clone()
                };
                profile = profile.with_password(password);
            }
            handle_set(conn_mgr, name, profile)
        }
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
    }
}

fn handle_list(conn_mgr: &ConnectionManager, output_format: OutputFormat) -> CliResult<()> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();
    trace!("Found {} profiles", profiles.len());

    if profiles.is_empty() && !matches!(output_format, OutputFormat::Json | OutputFormat::Yaml) {
        println!("No profiles configured.");
        println!("Use 'abiquoctl profile set' to create a profile.");
        return Ok(());
    }

    let default = conn_mgr.config.default_profile.as_deref();
    let summaries: Vec<ProfileSummary<'_>> = profiles
        .iter()
        .map(|(name, profile)| {
            ProfileSummary::new(name.as_str(), profile, default == Some(name.as_str()))
        })
        .collect();
    print_output(&summaries, output_format)?;
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager, output_format: OutputFormat) -> CliResult<()> {
    let config_path = conn_mgr.effective_config_path()?;

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let output_data = serde_json::json!({
                "config_path": config_path.to_string_lossy(),
            });
            print_output(&output_data, output_format)?;
        }
        OutputFormat::Auto | OutputFormat::Table => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: &str,
    output_format: OutputFormat,
) -> CliResult<()> {
    let profile = conn_mgr.config.profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    let summary = ProfileSummary::new(name, profile, is_default);

    match output_format {
        OutputFormat::Json | OutputFormat::Yaml => print_output(&summary, output_format)?,
        OutputFormat::Auto | OutputFormat::Table => {
            println!("Profile: {}", summary.name);
            println!("URL: {}", summary.url);
            println!("Username: {}", summary.username);
            println!("Password: {}", summary.password);
            println!("Insecure: {}", summary.insecure);
            if summary.default {
                println!("Default: yes");
            }
        }
    }
    Ok(())
}

fn handle_set(conn_mgr: &ConnectionManager, name: &str, profile: Profile) -> CliResult<()> {
    debug!("Setting profile: {}", name);
    if profile.url.trim().is_empty() {
        return Err(AbiquoCtlError::InvalidInput {
            message: "--url must not be empty".to_string(),
        });
    }

    let mut conn_mgr = conn_mgr.clone();
    let replaced = conn_mgr.config.profiles.contains_key(name);
    conn_mgr.config.set_profile(name.to_string(), profile);
    if conn_mgr.config.default_profile.is_none() {
        conn_mgr.config.default_profile = Some(name.to_string());
        println!("Profile '{}' set as the default.", name);
    }
    conn_mgr.save_config()?;

    if replaced {
        println!("Profile '{}' updated successfully.", name);
    } else {
        println!("Profile '{}' created successfully.", name);
    }
    Ok(())
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str) -> CliResult<()> {
    debug!("Removing profile: {}", name);

    let mut conn_mgr = conn_mgr.clone();
    let removed = conn_mgr
        .config
        .remove_profile(name)
        .ok_or_else(|| AbiquoCtlError::ProfileNotFound {
            name: name.to_string(),
        })?;

    #[cfg(feature = "secure-storage")]
    if let Some(password) = removed.password.as_deref()
        && CredentialStore::is_keyring_reference(password)
    {
        CredentialStore::with_keyring().delete_credential(password)?;
    }
    #[cfg(not(feature = "secure-storage"))]
    drop(removed);

    conn_mgr.save_config()?;
    println!("Profile '{}' removed successfully.", name);
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> CliResult<()> {
    debug!("Setting default profile: {}", name);
    conn_mgr.config.profile(name)?;

    let mut conn_mgr = conn_mgr.clone();
    conn_mgr.config.default_profile = Some(name.to_string());
    conn_mgr.save_config()?;

    println!("Default profile set to '{}'.", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_displayed() {
        let plaintext = Profile::new("https://a/api", "admin").with_password("xabiquo");
        assert_eq!(password_display(&plaintext), "********");

        let keyring = Profile::new("https://a/api", "admin").with_password("keyring:prod-password");
        assert_eq!(password_display(&keyring), "(keyring)");

        let from_env = Profile::new("https://a/api", "admin");
        assert_eq!(password_display(&from_env), "(from ABIQUO_PASSWORD)");
    }
}
